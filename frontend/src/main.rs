use campus_energy_frontend::{App, logging};
use leptos::prelude::*;

pub fn main() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::DEBUG);
    mount_to_body(App);
}
