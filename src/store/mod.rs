pub mod http;
pub mod memory;
pub mod traits;

pub use http::HttpPropertyStore;
pub use memory::MemoryPropertyStore;
pub use traits::PropertyStore;
