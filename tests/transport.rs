// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transports using wiremock.

#![cfg(all(feature = "cloud", feature = "local"))]

use std::time::Duration;

use remolight::dispatch::{CloudConfig, IrSignal, LocalConfig, SignalMap};
use remolight::{Controller, DispatchError, Dispatcher, LightConfig, SignalClass};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signal_ids() -> SignalMap<String> {
    SignalMap::new(
        "sig-power".to_string(),
        "sig-point".to_string(),
        "sig-color".to_string(),
        "sig-brightness".to_string(),
    )
}

fn waveforms() -> SignalMap<IrSignal> {
    SignalMap::new(
        IrSignal::new(vec![3400, 1700, 450, 1300]),
        IrSignal::new(vec![3400, 1700, 450, 450]),
        IrSignal::new(vec![3400, 1700, 1300, 450]),
        IrSignal::new(vec![3400, 1700, 1300, 1300]),
    )
}

// ============================================================================
// Cloud
// ============================================================================

mod cloud {
    use super::*;

    async fn dispatcher(server: &MockServer) -> remolight::dispatch::CloudDispatcher {
        CloudConfig::new("secret-token", signal_ids())
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(2))
            .into_dispatcher()
            .unwrap()
    }

    #[tokio::test]
    async fn sends_learned_signal_with_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/signals/sig-point/send"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        dispatcher(&server).await.send(SignalClass::Point).await.unwrap();
    }

    #[tokio::test]
    async fn each_class_uses_its_own_signal() {
        let server = MockServer::start().await;

        for id in ["sig-power", "sig-point", "sig-color", "sig-brightness"] {
            Mock::given(method("POST"))
                .and(path(format!("/1/signals/{id}/send")))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
        }

        let dispatcher = dispatcher(&server).await;
        for signal in SignalClass::ALL {
            dispatcher.send(signal).await.unwrap();
        }
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = dispatcher(&server)
            .await
            .send(SignalClass::Power)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn server_error_is_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = dispatcher(&server)
            .await
            .send(SignalClass::Color)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Status { code: 500, .. }));
        assert_eq!(err.to_string(), "HTTP 500 - Internal Server Error");
    }
}

// ============================================================================
// Local
// ============================================================================

mod local {
    use super::*;

    #[tokio::test]
    async fn posts_waveform_to_messages() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-requested-with", "local"))
            .and(body_json(serde_json::json!({
                "format": "us",
                "freq": 38,
                "data": [3400, 1700, 1300, 1300]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = LocalConfig::new(server.uri(), waveforms())
            .into_dispatcher()
            .unwrap();
        dispatcher.send(SignalClass::Brightness).await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_device_is_http_error() {
        let dispatcher = LocalConfig::new("127.0.0.1:9", waveforms())
            .with_timeout(Duration::from_millis(500))
            .into_dispatcher()
            .unwrap();

        let err = dispatcher.send(SignalClass::Power).await.unwrap_err();
        assert!(matches!(err, DispatchError::Http(_)));
    }
}

// ============================================================================
// Controller from configuration
// ============================================================================

mod configured {
    use super::*;

    #[tokio::test]
    async fn cloud_config_drives_power_on() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/signals/sig-power/send"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = LightConfig::from_json_str(&format!(
            r#"{{
                "interval_ms": 10,
                "transport": {{
                    "kind": "cloud",
                    "access_token": "secret-token",
                    "base_url": "{}",
                    "signals": {{
                        "power": "sig-power",
                        "point": "sig-point",
                        "color": "sig-color",
                        "brightness": "sig-brightness"
                    }}
                }}
            }}"#,
            server.uri()
        ))
        .unwrap();

        let controller = Controller::from_config(config).unwrap();
        controller.set_power(true).await;

        assert!(controller.power());
        assert!(controller.main_on());
    }

    #[tokio::test]
    async fn local_config_failure_leaves_state() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let config = LightConfig::from_json_str(&format!(
            r#"{{
                "transport": {{
                    "kind": "local",
                    "host": "{}",
                    "signals": {{
                        "power": {{"data": [1, 2]}},
                        "point": {{"data": [3, 4]}},
                        "color": {{"data": [5, 6]}},
                        "brightness": {{"data": [7, 8]}}
                    }}
                }}
            }}"#,
            server.uri()
        ))
        .unwrap();

        let controller = Controller::from_config(config).unwrap();
        let err = controller
            .transition(remolight::ZoneEvent::PowerOn)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            remolight::Error::Dispatch(DispatchError::Status { code: 503, .. })
        ));
        assert!(!controller.power());
    }
}
