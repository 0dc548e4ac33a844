use std::sync::Arc;

use log::warn;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{Response, Route, handlers};
use tr_hmi_bus::HmiNode;

/// Dispatches socket requests to their handlers.
#[derive(Debug)]
pub struct Router {
    node: Arc<HmiNode>,
    map: Mutex<String>,
}

impl Router {
    /// `map` is the map file reported until the UI selects another one.
    pub fn new(node: Arc<HmiNode>, map: impl Into<String>) -> Self {
        Self {
            node,
            map: Mutex::new(map.into()),
        }
    }

    pub fn node(&self) -> &Arc<HmiNode> {
        &self.node
    }

    pub fn map(&self) -> String {
        self.map.lock().clone()
    }

    /// Handles a request on the socket event `path`.
    ///
    /// `None` if the route does not answer.
    pub fn dispatch(&self, path: &str, request: Value) -> Option<Response> {
        match path.parse::<Route>() {
            Ok(route) => self.handle(route, request),
            Err(e) => {
                warn!("{e}");
                Some(Response::unknown_route())
            }
        }
    }

    pub fn handle(&self, route: Route, request: Value) -> Option<Response> {
        let node = &self.node;
        match route {
            Route::MapSetting => Some(handlers::map_setting(&self.map, request)),
            Route::SpeedSetting => Some(handlers::speed_setting(&node.velocity, request)),
            Route::LaunchMode => Some(handlers::launch_mode(&node.launch, request)),
            Route::CmdVel => {
                handlers::cmd_vel(&node.velocity, request);
                None
            }
            Route::Goal => Some(handlers::goal(&node.goal, request)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use tr_hmi_bus::{
        Bus, SpeedLimits, TopicNames,
        messages::{LaunchMode, Twist},
    };

    fn router() -> Router {
        let node = HmiNode::new(
            Arc::new(Bus::new()),
            &TopicNames::default(),
            SpeedLimits::default(),
        )
        .unwrap();
        Router::new(Arc::new(node), "2105.yaml")
    }

    fn code(response: Option<Response>) -> u16 {
        response.expect("Expected a response").code
    }

    #[test]
    fn map_setting() {
        let router = router();
        let response = router
            .dispatch("/settings/map", json!({"method": "get"}))
            .unwrap();
        assert_eq!(response, Response::success_with(json!({"map": "2105.yaml"})));

        let response = router.dispatch(
            "/settings/map",
            json!({"method": "set", "data": {"map": "lab.yaml"}}),
        );
        assert_eq!(response, Some(Response::success()));
        assert_eq!(router.map(), "lab.yaml");

        let response = router.dispatch("/settings/map", json!({"method": "put"}));
        assert_eq!(response, Some(Response::bad_request_method()));

        let response = router.dispatch("/settings/map", json!({"data": {}}));
        assert_eq!(response, Some(Response::bad_request()));
        assert_eq!(router.map(), "lab.yaml");
    }

    #[test]
    fn speed_setting() {
        let router = router();
        let response = router
            .dispatch("/settings/speed", json!({"method": "get"}))
            .unwrap();
        assert_eq!(response.data, Some(json!({"maxVx": 2.0, "maxVt": 2.0})));

        let response = router.dispatch(
            "/settings/speed",
            json!({"method": "set", "data": {"maxVt": 0.5}}),
        );
        assert_eq!(code(response), Response::SUCCESS);
        assert_eq!(
            router.node().velocity.limits(),
            SpeedLimits {
                max_vx: 2.0,
                max_vt: 0.5
            }
        );

        let response = router.dispatch(
            "/settings/speed",
            json!({"method": "set", "data": {"maxVx": -3}}),
        );
        assert_eq!(code(response), Response::ERROR);
        assert_eq!(code(router.dispatch("/settings/speed", json!(42))), 500);
    }

    #[test]
    fn launch_mode() {
        let router = router();
        assert_eq!(
            code(router.dispatch("/launch_mode", json!({"mode": "navigation"}))),
            200
        );
        assert_eq!(
            router.node().launch.mode(),
            Some(LaunchMode::from("navigation"))
        );

        assert_eq!(code(router.dispatch("/launch_mode", json!({}))), 500);
        assert_eq!(code(router.dispatch("/launch_mode", json!({"mode": ""}))), 500);
    }

    #[test]
    fn cmd_vel_publishes_without_answering() {
        let router = router();
        let mut subscription = router.node().velocity.topic().subscribe();

        assert_eq!(router.dispatch("/cmd_vel", json!({"vx": 0.4, "vt": 0.1})), None);
        assert_eq!(subscription.try_recv(), Some(Twist::planar(0.4, 0.1)));

        assert_eq!(router.dispatch("/cmd_vel", json!({"vx": 0.4})), None);
        assert_eq!(subscription.try_recv(), None);
    }

    #[test]
    fn goal() {
        let router = router();
        let request = json!({
            "originalPose": {"pose": {"position": {"x": 1.0, "y": 1.0}}},
            "angle": 180
        });
        assert_eq!(code(router.dispatch("/goal", request)), 200);
        assert!(router.node().goal.topic().latched().is_some());

        assert_eq!(code(router.dispatch("/goal", json!({"angle": 180}))), 500);
    }

    #[test]
    fn unknown_route() {
        let router = router();
        assert_eq!(
            router.dispatch("/settings/volume", json!({"method": "get"})),
            Some(Response::unknown_route())
        );
    }
}
