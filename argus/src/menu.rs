//! The interactive dispatch loop.
//!
//! A single-threaded state machine: render the registry as a numbered menu,
//! block for one line of input, then either exit, dispatch one unit, or
//! report an invalid selection and render again. Each input line maps to an
//! explicit [`Selection`]; no control flow rides on errors.
//!
//! Menu numbering is 1-based registry order. Nothing here mutates the
//! registry, and nothing runs concurrently with a dispatched unit: the loop
//! waits for the entrypoint to return before rendering again. A unit that
//! returns an error is reported and the menu comes back; the session ends
//! only on the quit token or end of input.

use argus_runtime::UnitRegistry;
use argus_unit_core::InputSource;
use std::time::Duration;
use tracing::{error, info};

/// Reserved input token that ends the session. Compared case-insensitively.
pub const QUIT_TOKEN: &str = "q";

/// How long the loop pauses after an invalid selection, so the message is
/// readable before the menu redraws.
const INVALID_PAUSE: Duration = Duration::from_secs(1);

/// What one line of operator input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// End the session.
    Quit,
    /// Run the unit at this 1-based menu position.
    Dispatch(usize),
    /// Not a selection; re-prompt.
    Invalid,
}

/// Map one input line to a [`Selection`].
///
/// Priority order: quit token first, then a menu position within
/// `1..=count`, then everything else is invalid. Input is trimmed; case
/// matters only for the quit comparison, where it is ignored.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let input = input.trim();

    if input.eq_ignore_ascii_case(QUIT_TOKEN) {
        return Selection::Quit;
    }

    match input.parse::<usize>() {
        Ok(k) if (1..=count).contains(&k) => Selection::Dispatch(k),
        _ => Selection::Invalid,
    }
}

/// Render the menu for the current registry.
///
/// One line per unit, `"<index>. <description>"` in registry order,
/// followed by the quit line.
pub fn render_menu(registry: &UnitRegistry) -> String {
    let mut menu = String::from("Select a unit to run:\n");
    for (i, descriptor) in registry.list().iter().enumerate() {
        menu.push_str(&format!("{}. {}\n", i + 1, descriptor.description));
    }
    menu.push_str(&format!("{QUIT_TOKEN}. Quit\n"));
    menu
}

/// Drive the dispatch loop until the operator quits or input ends.
///
/// The loop and every unit it dispatches read from the same [`InputSource`],
/// so a line typed after a selection goes to whichever side asks for it
/// next — the unit's prompt while the unit runs, the menu afterwards. Tests
/// script whole sessions through the same handle; the binary passes stdin.
pub async fn run_menu(registry: &UnitRegistry, input: &InputSource) -> std::io::Result<()> {
    loop {
        print!("{}", render_menu(registry));
        println!("Enter choice:");

        let Some(line) = input.next_line().await? else {
            info!("Input closed, ending session");
            return Ok(());
        };

        match parse_selection(&line, registry.count()) {
            Selection::Quit => {
                info!("Session ended by operator");
                return Ok(());
            }
            Selection::Dispatch(k) => {
                let descriptor = &registry.list()[k - 1];
                info!("Dispatching unit: {}", descriptor.id);
                if let Err(e) = descriptor.unit.run().await {
                    error!("Unit '{}' failed: {}", descriptor.id, e);
                    println!("Unit '{}' failed: {e}", descriptor.id);
                }
            }
            Selection::Invalid => {
                println!("Invalid choice. Enter a unit number or '{QUIT_TOKEN}' to quit.");
                tokio::time::sleep(INVALID_PAUSE).await;
            }
        }
    }
}
