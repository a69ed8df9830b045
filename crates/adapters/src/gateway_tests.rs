// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use warden_core::Event;

#[tokio::test]
async fn null_gateway_drops_every_event() {
    let gateway = NullGateway;
    assert!(gateway.publish(Event::DaemonStarted).await.is_ok());
}
