//! # InTouch Kit
//!
//! A typed SDK for the InTouch (GuTouch) mobile-money gateway. It covers the
//! four operations a merchant integration needs against Orange Money and MTN
//! Mobile Money in Cameroon:
//!
//! - **merchant payment**: collect a payment from a subscriber (`PUT`, HTTP Digest),
//! - **cash-out**: same wire shape as merchant payment with the cash-out service codes,
//! - **cash-in**: credit a subscriber's wallet (`POST`, HTTP Basic),
//! - **balance**: query the partner account (`POST`, HTTP Basic).
//!
//! InTouch Kit only builds and sends the outbound call and returns the
//! gateway's immediate answer. Payment results are delivered asynchronously
//! to the callback URL you supply; receiving them is up to your application.
//!
//! ## Core Components Overview
//!
//! - **[`client`]**: [`IntouchClient`](client::IntouchClient) and the fluent [`Transaction`](client::Transaction) builder.
//! - **[`config`]**: Account [`Credentials`](config::Credentials) and endpoint templates.
//! - **[`validation`]**: The preconditions checked before anything is sent.
//! - **[`resolver`]**: Operation × operator lookup of service codes and endpoints.
//! - **[`transport`]**: Request bodies and the [`GatewayResponse`](transport::GatewayResponse).
//! - **[`concepts`]**: [`Operator`](concepts::Operator), [`Operation`](concepts::Operation) and the [`Gateway`](concepts::Gateway) trait.
//! - **[`types`]**: Validated value types such as [`Amount`](types::Amount) and [`PhoneNumber`](types::PhoneNumber).
//!
//! ## Example
//!
//! ```no_run
//! use intouch_kit::{client::IntouchClient, config::Credentials};
//!
//! # async fn run() -> Result<(), intouch_kit::errors::Error> {
//! let client = IntouchClient::new(
//!     Credentials::builder()
//!         .username("api-user")
//!         .password("api-pass")
//!         .login_agent("AG1")
//!         .password_agent("PW1")
//!         .intouch_id("123")
//!         .build(),
//! )?;
//!
//! let response = client
//!     .transaction()
//!     .amount(5000)
//!     .phone("677123456")
//!     .operator("mtn")?
//!     .partner_id("MY_PARTNER_ID")
//!     .callback("https://merchant.example/intouch/callback")
//!     .make_cashin(None)
//!     .await?;
//!
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```
//!
//! ## Validation
//!
//! Rules are checked when the terminal operation runs, in the order amount,
//! partner id, phone, callback. The first violation is returned and no
//! request is sent.
//!
//! | Operation | Amount   | Partner id | Phone       | Callback |
//! |-----------|----------|------------|-------------|----------|
//! | merchant  | ≥ 100    | -          | `^6\d{8}$`  | http(s)  |
//! | cashin    | ≥ 100    | required   | `^6\d{8}$`  | http(s)  |
//! | cashout   | ≥ 100    | -          | `^6\d{8}$`  | http(s)  |
//! | balance   | -        | required   | `^6\d{8}$`  | -        |
//!
//! ## Features
//!
//! - `tracing` (default): emit `tracing` debug events for resolved targets,
//!   digest challenges and gateway statuses. Secrets are never logged.

pub mod client;
pub mod concepts;
pub mod config;
pub mod digest;
pub mod draft;
pub mod errors;
pub mod resolver;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::{IntouchClient, Transaction};
pub use concepts::{Gateway, Operation, Operator};
pub use config::{Credentials, Endpoints};
pub use errors::{Error, Result, ValidationError};
