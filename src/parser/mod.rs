// Sheet parsing: CSV tables into offer rows and catalog items

pub mod sheet_parser;

pub use sheet_parser::{CatalogSheetParser, OfferSheetParser, Parser};
