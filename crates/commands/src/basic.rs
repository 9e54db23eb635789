use coco_primitives::{CommandResult, Context, Interrupt, Params, Value};
use tracing::info;

/// Logs `msg` at info level.
///
/// Params:
/// - `msg`: the message. Defaults to `"tick"`.
pub fn log_message(_cxt: &mut Context, params: &Params) -> CommandResult {
	let msg = params.get("msg", "tick");
	match msg.downcast_ref::<String>() {
		Some(text) => info!("{text}"),
		None => info!(value = ?msg),
	}
	Ok(Value::nil())
}

/// Abandons the current route for another.
///
/// Params:
/// - `route` (required): the route to run next.
pub fn reroute(_cxt: &mut Context, params: &Params) -> CommandResult {
	let route = params.require::<String>("route")?;
	Err(Interrupt::reroute(route.as_str()))
}
