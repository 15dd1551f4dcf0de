//! The slice of the Egg, Inc. protobuf schema the bot reads and writes.
//!
//! Only the fields we use are declared; prost skips unknown tags when
//! decoding, so the rest of the game's backup is ignored.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FirstContactRequest {
    #[prost(uint32, optional, tag = "2")]
    pub client_version: Option<u32>,
    #[prost(string, optional, tag = "4")]
    pub ei_user_id: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub device_id: Option<String>,
}

/// Envelope wrapping every response body.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthenticatedMessage {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub message: Option<Vec<u8>>,
    #[prost(string, optional, tag = "2")]
    pub code: Option<String>,
    #[prost(uint32, optional, tag = "3")]
    pub version: Option<u32>,
    #[prost(bool, optional, tag = "4")]
    pub compressed: Option<bool>,
    #[prost(uint32, optional, tag = "5")]
    pub original_size: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FirstContactResponse {
    #[prost(message, optional, tag = "1")]
    pub backup: Option<Backup>,
    #[prost(string, optional, tag = "2")]
    pub ei_user_id: Option<String>,
    #[prost(uint32, optional, tag = "4")]
    pub error_code: Option<u32>,
    #[prost(string, optional, tag = "5")]
    pub error_message: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Backup {
    #[prost(string, optional, tag = "1")]
    pub user_id: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub user_name: Option<String>,
    #[prost(message, optional, tag = "4")]
    pub game: Option<Game>,
    #[prost(string, optional, tag = "18")]
    pub ei_user_id: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Game {
    #[prost(message, repeated, tag = "9")]
    pub epic_research: Vec<ResearchItem>,
    #[prost(uint64, optional, tag = "23")]
    pub eggs_of_prophecy: Option<u64>,
    #[prost(double, optional, tag = "34")]
    pub soul_eggs_d: Option<f64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResearchItem {
    #[prost(string, optional, tag = "1")]
    pub id: Option<String>,
    #[prost(uint32, optional, tag = "2")]
    pub level: Option<u32>,
}
