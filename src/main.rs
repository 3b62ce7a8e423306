// Trunk builds the site binary from here. The native `main` exists only so
// the crate still links without the `web` feature; it has nothing to run.

fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    refycon_web::start();
}
