pub mod explorer;
pub mod walker;

pub use explorer::WireExplorer;
pub use walker::Topo;
