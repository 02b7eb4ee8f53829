use serde::{Deserialize, Serialize};

/// Payload handed to the booking backend once a patient has picked a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "docId")]
    pub doc_id: String,
    #[serde(rename = "slotDate")]
    pub slot_date: String,
    #[serde(rename = "slotTime")]
    pub slot_time: String,
}
