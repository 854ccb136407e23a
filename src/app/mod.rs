// Simulation host: scripted browser events replayed through the controller on a tokio event loop.

#[cfg(not(target_arch = "wasm32"))]
pub mod event_loop;
#[cfg(not(target_arch = "wasm32"))]
pub mod report;
pub mod script;
