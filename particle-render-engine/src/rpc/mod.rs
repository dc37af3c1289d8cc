//! JSON-RPC 2.0 communication layer for the browser frontend.
//!
//! Implements bidirectional messaging between the Bevy engine and the host
//! page via iframe postMessage, supporting both request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Page (Parent Window)   <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ hand_result (notification) ─────────> │
//!        │                                        ├─ classify, regenerate
//!        │ <──────────── gesture_changed ─────────┤
//!        │ <──────────── fps_update ──────────────┤
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//! ```
//!
//! ## Incoming
//!
//! - `hand_result` (notification): `{ landmarks: [{x, y, z}] | null, handedness }`
//!   from the browser-side hand detector. Null or empty landmarks mean no hand.
//! - `get_gesture`: current gesture and its label.
//! - `get_fps`: rate reported by the last completed one-second window.
//! - `set_palm_loss_policy`: `{ policy: "hold" | "reset" }`.
//!
//! ## Outgoing
//!
//! - `gesture_changed`: `{ gesture, label }`, sent on transitions only.
//! - `fps_update`: `{ fps }`, once per second.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error (engine still loading)

/// JSON-RPC 2.0 bidirectional communication system for the frontend.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
