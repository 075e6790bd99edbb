//! Wire schema of the PowerDNS `PBDNSMessage` (proto2).
//!
//! Only the fields this exporter reads or writes are declared; unknown
//! fields are skipped by the decoder. Enum-typed fields are kept as raw
//! `i32` so an absent tag can be told apart from the first enum value.

/// `PBDNSMessage.Type`
pub mod message_type {
    pub const DNS_QUERY: i32 = 1;
    pub const DNS_RESPONSE: i32 = 2;
    pub const DNS_OUTGOING_QUERY: i32 = 3;
    pub const DNS_INCOMING_RESPONSE: i32 = 4;
}

/// `PBDNSMessage.SocketFamily`
pub mod socket_family {
    pub const INET: i32 = 1;
    pub const INET6: i32 = 2;
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PbDnsMessage {
    #[prost(int32, optional, tag = "1")]
    pub r#type: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub message_id: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub server_identity: Option<Vec<u8>>,
    #[prost(int32, optional, tag = "4")]
    pub socket_family: Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub socket_protocol: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub from: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub to: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "8")]
    pub in_bytes: Option<u64>,
    #[prost(uint32, optional, tag = "9")]
    pub time_sec: Option<u32>,
    #[prost(uint32, optional, tag = "10")]
    pub time_usec: Option<u32>,
    /// Declared `uint32` upstream; read as `uint64`, which is the same varint
    /// on the wire and never truncates.
    #[prost(uint64, optional, tag = "11")]
    pub id: Option<u64>,
    #[prost(message, optional, tag = "12")]
    pub question: Option<pb_dns_message::DnsQuestion>,
    #[prost(message, optional, tag = "13")]
    pub response: Option<pb_dns_message::DnsResponse>,
    #[prost(bytes = "vec", optional, tag = "14")]
    pub original_requestor_subnet: Option<Vec<u8>>,
    #[prost(string, optional, tag = "15")]
    pub requestor_id: Option<String>,
    #[prost(bytes = "vec", optional, tag = "16")]
    pub initial_request_id: Option<Vec<u8>>,
    #[prost(uint32, optional, tag = "20")]
    pub from_port: Option<u32>,
    #[prost(uint32, optional, tag = "21")]
    pub to_port: Option<u32>,
}

pub mod pb_dns_message {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DnsQuestion {
        #[prost(string, optional, tag = "1")]
        pub q_name: Option<String>,
        #[prost(uint32, optional, tag = "2")]
        pub q_type: Option<u32>,
        #[prost(uint32, optional, tag = "3")]
        pub q_class: Option<u32>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DnsResponse {
        #[prost(uint32, optional, tag = "1")]
        pub rcode: Option<u32>,
        #[prost(message, repeated, tag = "2")]
        pub rrs: Vec<dns_response::DnsRr>,
        #[prost(string, optional, tag = "3")]
        pub applied_policy: Option<String>,
        #[prost(string, repeated, tag = "4")]
        pub tags: Vec<String>,
        #[prost(uint32, optional, tag = "5")]
        pub query_time_sec: Option<u32>,
        #[prost(uint32, optional, tag = "6")]
        pub query_time_usec: Option<u32>,
    }

    pub mod dns_response {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct DnsRr {
            #[prost(string, optional, tag = "1")]
            pub name: Option<String>,
            #[prost(uint32, optional, tag = "2")]
            pub r#type: Option<u32>,
            #[prost(uint32, optional, tag = "3")]
            pub class: Option<u32>,
            #[prost(uint32, optional, tag = "4")]
            pub ttl: Option<u32>,
            #[prost(bytes = "vec", optional, tag = "5")]
            pub rdata: Option<Vec<u8>>,
            #[prost(bool, optional, tag = "6")]
            pub udr: Option<bool>,
        }
    }
}
