use crate::Result;

/// Destination for exported file contents.
///
/// The core hands `export` output to this collaborator together with a
/// destination identifier (a host path, usually); what happens to the
/// bytes from there is the implementor's business.
pub trait ByteSink {
    fn write(&mut self, destination: &str, data: &[u8]) -> Result<()>;
}
