//! Offline query executor for ghperm.
//!
//! [`FileExecutor`] answers organization queries from a JSON recording
//! instead of the network. A recording lists the responses the API gave for
//! each pagination position:
//!
//! ```json
//! {
//!   "responses": [
//!     {
//!       "variables": {"endCursor": null, "innerCursor": null},
//!       "response": {"data": {"organization": {"repositories": {"nodes": [], "pageInfo": {"hasNextPage": false}}}}}
//!     }
//!   ]
//! }
//! ```
//!
//! Requests are matched on `endCursor` and `innerCursor`. When a recorded
//! entry also names an `orgname`, it only answers queries for that
//! organization.

mod recording;
mod replay;

pub use recording::{Recording, RecordedExchange, RecordedResponse, RecordedVariables};
pub use replay::FileExecutor;
