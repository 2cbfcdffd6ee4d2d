mod canonicalize_unexistent;
pub use canonicalize_unexistent::canonicalize_unexistent;

mod init_logging;
pub use init_logging::*;

pub mod constants;
