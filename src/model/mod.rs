//! measCollecFile document model
//!
//! Entities are built once, top-down, from the nested mapping of a
//! 3GPP TS 32.435 measurement collection file, and never change afterwards.
//!
//! - Entity layer: [`FileHeader`], [`FileSender`], [`FileFooter`],
//!   [`MeasCollect`], [`ManagedElement`], [`Job`], [`GranPeriod`],
//!   [`RepPeriod`], [`MeasType`], [`MeasValue`]
//! - Aggregation layer: [`MeasInfo`], [`MeasData`] and the root
//!   [`MeasCollecFile`], which also flattens the tree into records

mod element;
mod file;
mod header;
mod info;
mod measurement;
pub mod node;

pub use element::{GranPeriod, Job, ManagedElement, RepPeriod};
pub use file::{MeasCollecFile, ROOT_ELEMENT};
pub use header::{FileFooter, FileHeader, FileSender, MeasCollect};
pub use info::{MeasData, MeasInfo};
pub use measurement::{paired_type, MeasType, MeasValue};
pub use node::{ParseMode, Repeated};
