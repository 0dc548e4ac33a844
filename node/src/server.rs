use std::{cell::RefCell, rc::Rc};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tr_hmi_input::{GestureEvent, GestureEventKind, Stage, TransformableConfig};
use tr_hmi_socket::{Response, Route, Router};
use tr_hmi_util::CoalescingKey;

/// A line received from the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Inbound {
    /// A request on a socket event.
    Request {
        route: String,
        #[serde(default)]
        request: Value,
    },
    /// A raw event of the map stage.
    Stage { stage: Value },
}

impl CoalescingKey for Inbound {
    type Key = String;

    /// Only the most recent pending velocity command matters.
    fn coalescing_key(&self) -> Option<String> {
        match self {
            Inbound::Request { route, .. } if *route == Route::CmdVel.path() => Some(route.clone()),
            _ => None,
        }
    }
}

/// A line sent to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outbound {
    Response { route: String, response: Response },
    Gesture { gesture: GestureEvent },
}

/// Routes the UI's requests and interprets its stage events.
#[derive(Debug)]
pub struct Server {
    router: Router,
    stage: Stage,
    gestures: Rc<RefCell<Vec<GestureEvent>>>,
}

impl Server {
    pub fn new(router: Router, gesture_config: TransformableConfig) -> Self {
        let mut stage = Stage::new(gesture_config);
        let gestures = Rc::new(RefCell::new(Vec::new()));
        for kind in GestureEventKind::ALL {
            let gestures = gestures.clone();
            stage.on(kind, move |gesture| {
                debug!("Gesture: {gesture:?}");
                gestures.borrow_mut().push(gesture.clone());
            });
        }

        Self {
            router,
            stage,
            gestures,
        }
    }

    pub fn handle(&mut self, inbound: Inbound) -> Vec<Outbound> {
        match inbound {
            Inbound::Request { route, request } => self
                .router
                .dispatch(&route, request)
                .map(|response| Outbound::Response { route, response })
                .into_iter()
                .collect(),
            Inbound::Stage { stage } => {
                self.stage.deliver(stage);
                self.gestures
                    .borrow_mut()
                    .drain(..)
                    .map(|gesture| Outbound::Gesture { gesture })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use tr_hmi_bus::{Bus, HmiNode, SpeedLimits, TopicNames};
    use tr_hmi_input::Release;

    fn server() -> Server {
        let node = HmiNode::new(
            Arc::new(Bus::new()),
            &TopicNames::default(),
            SpeedLimits::default(),
        )
        .unwrap();
        Server::new(
            Router::new(Arc::new(node), "2105.yaml"),
            TransformableConfig::default(),
        )
    }

    fn inbound(value: Value) -> Inbound {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_both_kinds_of_lines() {
        assert!(matches!(
            inbound(json!({"route": "/settings/map", "request": {"method": "get"}})),
            Inbound::Request { .. }
        ));
        assert!(matches!(
            inbound(json!({"stage": {"type": "tick"}})),
            Inbound::Stage { .. }
        ));
        assert!(serde_json::from_value::<Inbound>(json!({"hello": 1})).is_err());
    }

    #[test]
    fn only_velocity_commands_coalesce() {
        let velocity = inbound(json!({"route": "/cmd_vel", "request": {"vx": 1, "vt": 1}}));
        let map = inbound(json!({"route": "/settings/map", "request": {}}));
        let stage = inbound(json!({"stage": {"type": "tick"}}));

        assert_eq!(velocity.coalescing_key().as_deref(), Some("/cmd_vel"));
        assert_eq!(map.coalescing_key(), None);
        assert_eq!(stage.coalescing_key(), None);
    }

    #[test]
    fn answers_requests() {
        let mut server = server();
        let out = server.handle(inbound(
            json!({"route": "/settings/map", "request": {"method": "get"}}),
        ));
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!([{
                "route": "/settings/map",
                "response": {"code": 200, "message": "success", "data": {"map": "2105.yaml"}}
            }])
        );

        let out = server.handle(inbound(
            json!({"route": "/cmd_vel", "request": {"vx": 0.1, "vt": 0.1}}),
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn emits_gestures_of_stage_events() {
        let mut server = server();
        let out = server.handle(inbound(json!({
            "stage": {"type": "stagemousedown", "pointerID": 1, "stageX": 0, "stageY": 0}
        })));
        assert_eq!(
            out,
            vec![Outbound::Gesture {
                gesture: GestureEvent::Start { active: 1 }
            }]
        );

        let out = server.handle(inbound(json!({
            "stage": {"type": "stagemouseup", "pointerID": 1, "stageX": 0, "stageY": 0}
        })));
        let kinds: Vec<_> = out
            .iter()
            .map(|o| match o {
                Outbound::Gesture { gesture } => gesture.kind(),
                other => panic!("Unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![GestureEventKind::Click, GestureEventKind::Complete]
        );

        let Outbound::Gesture {
            gesture: GestureEvent::Complete(Release { active, .. }),
        } = &out[1]
        else {
            panic!("Expected complete");
        };
        assert_eq!(*active, 0);
    }
}
