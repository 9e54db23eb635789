//! Core types shared by routes and commands: values, contexts, parameters, and
//! the command contract.

/// Command handler contract and interrupt taxonomy.
pub mod command;
/// Per-request variable and datasource store.
pub mod context;
/// Named long-lived resources and the keyed lookup capability.
pub mod datasource;
/// Typed reads over anything keyed.
pub mod getter;
/// Resolved parameters for one command call.
pub mod params;
/// Type-erased, possibly-nil values.
pub mod value;

pub use command::{CommandError, CommandResult, Handler, Interrupt};
pub use context::Context;
pub use datasource::{
	AsAny, Datasource, DatasourceRef, KeyValueDatasource, datasource_value, downcast_datasource,
};
pub use getter::{Fallback, Getter, KeyValueGetter, get_from_first};
pub use params::Params;
pub use value::Value;
