//! mf-io: reading and writing MCF instances as `link.csv` / `service.csv`
//! directories.
//!
//! ```no_run
//! use mf_io::{EdgeDirection, LoadOptions, load, save};
//!
//! let opts = LoadOptions { edge_dir: EdgeDirection::Double, ..Default::default() };
//! let pb = load("instances/abilene", &opts)?;
//! save(&pb.normalize(), "instances/abilene-normalized")?;
//! # Ok::<(), mf_io::IoError>(())
//! ```

mod csv;
pub mod error;
pub mod instance;
pub mod options;

pub use error::{IoError, IoResult};
pub use instance::{Instance, LINK_FILE, SERVICE_FILE, is_instance_dir, load, save};
pub use options::{EdgeDirection, Format, LoadOptions};
