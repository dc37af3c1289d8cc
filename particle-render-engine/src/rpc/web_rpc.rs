use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::engine::config::PalmLossPolicy;
use crate::engine::coordinator::EngineState;
use crate::engine::gesture::HandObservation;
use crate::engine::systems::fps_tracking::FpsCounter;
use crate::engine::systems::hand_input::HandObservationEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Notifications carry no `id`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    let message_queue = MessageQueue::default();
    let producer = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                producer.push(message_str);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        warn!("Window object not available, landmark stream disabled");
        return;
    };

    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(message_queue);
}

/// Raw messages pushed by the page listener, drained once per frame.
///
/// Closing the queue makes the listener drop everything it receives from
/// then on.
#[derive(Resource, Clone)]
pub struct MessageQueue {
    messages: Arc<Mutex<Vec<String>>>,
    open: Arc<AtomicBool>,
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            open: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MessageQueue {
    pub fn push(&self, message: String) {
        if !self.open.load(Ordering::Acquire) {
            return;
        }
        if let Ok(mut queue) = self.messages.lock() {
            queue.push(message);
        }
    }

    pub fn drain(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
        self.drain();
    }
}

/// Event representing incoming RPC message from the frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue) = message_queue else {
        return;
    };

    for message_str in queue.drain() {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut observations: EventWriter<HandObservationEvent>,
    mut engine: Option<ResMut<EngineState>>,
    fps: Res<FpsCounter>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Dropping unparsable RPC message: {}", parse_error);
                continue;
            }
        };

        if request.id.is_none() {
            if let Some(observation) = handle_rpc_notification(&request) {
                observations.write(HandObservationEvent(observation));
            }
            continue;
        }

        debug!("Processing method: {}", request.method);
        if let Some(response) = handle_rpc_request(&request, engine.as_deref_mut(), &fps) {
            rpc_interface.queue_response(response);
        }
    }
}

/// Turn an incoming notification into a landmark-stream event.
fn handle_rpc_notification(request: &RpcRequest) -> Option<HandObservation> {
    match request.method.as_str() {
        "hand_result" => match parse_hand_result(&request.params) {
            Ok(observation) => Some(observation),
            Err(error) => {
                warn!("Rejected hand_result: {}", error.message);
                None
            }
        },
        _ => {
            warn!("Unknown RPC notification: {}", request.method);
            None
        }
    }
}

/// Parse `hand_result` params. Null or empty landmarks mean no hand; a short
/// landmark list is passed through for the coordinator to reject.
pub fn parse_hand_result(params: &serde_json::Value) -> Result<HandObservation, RpcError> {
    #[derive(Deserialize)]
    struct LandmarkPoint {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
    }

    #[derive(Deserialize)]
    struct HandResultParams {
        #[serde(default)]
        landmarks: Option<Vec<LandmarkPoint>>,
        #[serde(default)]
        handedness: Option<String>,
    }

    let parsed = serde_json::from_value::<HandResultParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'landmarks' array of {x, y, z} or null"))?;

    match parsed.landmarks {
        Some(points) if !points.is_empty() => Ok(HandObservation::Hand {
            landmarks: points.iter().map(|p| Vec3::new(p.x, p.y, p.z)).collect(),
            handedness: parsed.handedness,
        }),
        _ => Ok(HandObservation::NoHand),
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    engine: Option<&mut EngineState>,
    fps: &FpsCounter,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "get_gesture" => handle_get_gesture(engine.as_deref()),
        "get_fps" => handle_get_fps(fps),
        "set_palm_loss_policy" => handle_set_palm_loss_policy(&request.params, engine),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_get_gesture(engine: Option<&EngineState>) -> Result<serde_json::Value, RpcError> {
    let state = engine.ok_or_else(|| RpcError::internal_error("Engine not ready"))?;
    let gesture = state.current_gesture();

    Ok(serde_json::json!({
        "gesture": gesture,
        "label": gesture.label(),
    }))
}

fn handle_get_fps(fps: &FpsCounter) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "fps": fps.last_fps().unwrap_or(0)
    }))
}

fn handle_set_palm_loss_policy(
    params: &serde_json::Value,
    engine: Option<&mut EngineState>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct PolicyParams {
        policy: String,
    }

    let policy_params = serde_json::from_value::<PolicyParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'policy' parameter"))?;

    let policy = PalmLossPolicy::from_string(&policy_params.policy).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown policy: {}", policy_params.policy))
    })?;

    let state = engine.ok_or_else(|| RpcError::internal_error("Engine not ready"))?;
    state.set_palm_loss_policy(policy);

    Ok(serde_json::json!({
        "success": true,
        "policy": policy.as_str()
    }))
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::PalmParams;
    use crate::engine::config::ShapeParams;
    use crate::engine::gesture::Gesture;
    use crate::engine::shapes::ShapeGenerator;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(1)),
        }
    }

    fn engine() -> EngineState {
        let mut generator = ShapeGenerator::new(ShapeParams::default(), Some(3), None);
        EngineState::new(64, &PalmParams::default(), &mut generator)
    }

    #[test]
    fn test_hand_result_with_landmarks() {
        let points: Vec<_> = (0..21)
            .map(|i| json!({ "x": i as f32 / 21.0, "y": 0.5, "z": -0.01 }))
            .collect();
        let params = json!({ "landmarks": points, "handedness": "Right" });

        match parse_hand_result(&params).unwrap() {
            HandObservation::Hand {
                landmarks,
                handedness,
            } => {
                assert_eq!(landmarks.len(), 21);
                assert_eq!(landmarks[0], Vec3::new(0.0, 0.5, -0.01));
                assert_eq!(handedness.as_deref(), Some("Right"));
            }
            HandObservation::NoHand => panic!("expected a hand"),
        }
    }

    #[test]
    fn test_hand_result_without_hand() {
        for params in [json!({ "landmarks": null }), json!({ "landmarks": [] }), json!({})] {
            assert!(matches!(
                parse_hand_result(&params).unwrap(),
                HandObservation::NoHand
            ));
        }
    }

    #[test]
    fn test_hand_result_missing_z_defaults_to_zero() {
        let params = json!({ "landmarks": [{ "x": 0.1, "y": 0.2 }] });
        match parse_hand_result(&params).unwrap() {
            HandObservation::Hand { landmarks, .. } => {
                assert_eq!(landmarks, vec![Vec3::new(0.1, 0.2, 0.0)]);
            }
            HandObservation::NoHand => panic!("expected a hand"),
        }
    }

    #[test]
    fn test_hand_result_bad_params() {
        let err = parse_hand_result(&json!({ "landmarks": "nope" })).unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_notification_parses_without_id() {
        let raw = r#"{"jsonrpc":"2.0","method":"hand_result","params":{"landmarks":null}}"#;
        let request = serde_json::from_str::<RpcRequest>(raw).unwrap();
        assert!(request.id.is_none());
        assert!(matches!(
            handle_rpc_notification(&request),
            Some(HandObservation::NoHand)
        ));
        assert!(handle_rpc_request(&request, None, &FpsCounter::default()).is_none());
    }

    #[test]
    fn test_get_gesture() {
        let mut state = engine();
        let response =
            handle_rpc_request(&request("get_gesture", json!({})), Some(&mut state), &FpsCounter::default())
                .unwrap();
        assert_eq!(response.result, Some(json!({ "gesture": "IDLE", "label": Gesture::Idle.label() })));
        assert_eq!(response.id, Some(json!(1)));
    }

    #[test]
    fn test_get_gesture_before_engine_ready() {
        let response =
            handle_rpc_request(&request("get_gesture", json!({})), None, &FpsCounter::default())
                .unwrap();
        assert_eq!(response.error.map(|e| e.code), Some(-32603));
    }

    #[test]
    fn test_get_fps() {
        let mut fps = FpsCounter::new(0.0);
        for frame in 1..=30 {
            fps.tick(frame as f64 / 30.0);
        }
        let response = handle_rpc_request(&request("get_fps", json!({})), None, &fps).unwrap();
        assert_eq!(response.result, Some(json!({ "fps": 30 })));
    }

    #[test]
    fn test_set_palm_loss_policy() {
        let mut state = engine();
        let response = handle_rpc_request(
            &request("set_palm_loss_policy", json!({ "policy": "reset" })),
            Some(&mut state),
            &FpsCounter::default(),
        )
        .unwrap();

        assert_eq!(response.result, Some(json!({ "success": true, "policy": "reset" })));
        assert_eq!(state.palm_loss_policy(), PalmLossPolicy::Reset);
    }

    #[test]
    fn test_set_palm_loss_policy_rejects_unknown() {
        let mut state = engine();
        let response = handle_rpc_request(
            &request("set_palm_loss_policy", json!({ "policy": "wobble" })),
            Some(&mut state),
            &FpsCounter::default(),
        )
        .unwrap();

        assert_eq!(response.error.map(|e| e.code), Some(-32602));
        assert_eq!(state.palm_loss_policy(), PalmLossPolicy::Hold);
    }

    #[test]
    fn test_unknown_method() {
        let response =
            handle_rpc_request(&request("teleport", json!({})), None, &FpsCounter::default())
                .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.data, Some(json!({ "method": "teleport" })));
    }

    #[test]
    fn test_closed_queue_drops_messages() {
        let queue = MessageQueue::default();
        let producer = queue.clone();

        producer.push("first".to_string());
        assert_eq!(queue.drain(), vec!["first".to_string()]);
        assert!(queue.drain().is_empty());

        producer.push("second".to_string());
        queue.close();
        producer.push("third".to_string());
        assert!(queue.drain().is_empty());
    }
}
