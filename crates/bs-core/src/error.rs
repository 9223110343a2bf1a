use thiserror::Error;

#[derive(Error, Debug)]
pub enum BsError {
    #[error("Unknown item slot: {name}")]
    UnknownSlot { name: String },
}
