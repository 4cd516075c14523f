//! HTTP transport for the roster client
//!
//! `HttpRemoteRoster` implements `RemoteRoster` against the collection
//! resource described in the server contract: `GET`/`POST` on the base
//! path, `PUT`/`DELETE` on `<base>/<id>`, with 400 field-error bodies
//! surfacing as validation failures.

pub mod client;

pub use client::HttpRemoteRoster;
