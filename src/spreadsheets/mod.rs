pub mod export_xlsx;

pub use export_xlsx::export_offers_xlsx;
