pub mod batch_coordinator;
pub mod flist;

pub use batch_coordinator::BatchCoordinator;
pub use flist::load_filenames;
