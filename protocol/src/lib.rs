use thiserror::Error;

pub mod metagame;
pub mod oracle;

pub use metagame::{BaseStats, CounterEntry, MetagameEntry, parse_metagame};
pub use oracle::{
    RESERVED_SET_PREFIXES, RawRecord, SetNames, StatLine, WireMove, WireRecord, WireSet,
    is_valid_record, parse_oracle_payload,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid payload format: {0}")]
    InvalidFormat(String),

    #[error("Empty payload")]
    EmptyPayload,
}
