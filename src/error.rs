#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    FileTooLarge,
    EmptyFile,
    OutOfSpace,
    TableFull,
    OutOfBounds,
    InvalidFileName,
    InvalidImage,
    CorruptHeader,
    NotFound,
    AlreadyExists,
    IoError,
}

pub type Result<T> = core::result::Result<T, FsError>;
