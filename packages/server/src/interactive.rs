//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and an optional UCDP access
//! token before starting the server.

use dialoguer::{Confirm, Input};

use crate::{DEFAULT_BIND_ADDR, DEFAULT_PORT};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks the user for a bind address and port, sets the corresponding
/// environment variables (`BIND_ADDR`, `PORT`, and `UCDP_ACCESS_TOKEN`
/// when a token is entered), and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Conflict Map Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(DEFAULT_BIND_ADDR.to_string())
        .interact_text()
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(DEFAULT_PORT)
        .interact_text()
        .unwrap_or(DEFAULT_PORT);

    let token: String = Input::new()
        .with_prompt("UCDP access token (leave empty for none)")
        .allow_empty(true)
        .default(std::env::var("UCDP_ACCESS_TOKEN").unwrap_or_default())
        .show_default(false)
        .interact_text()
        .unwrap_or_default();

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", port.to_string());
        if !token.trim().is_empty() {
            std::env::set_var("UCDP_ACCESS_TOKEN", token.trim());
        }
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
