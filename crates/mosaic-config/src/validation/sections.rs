//! Per-section validation.

use super::helpers::{clamp_range, reset_url_scheme, validate_range, validate_url_scheme};
use crate::schema::{MosaicConfig, ServerConfig};

pub(super) fn validate_server(errors: &mut Vec<String>, config: &MosaicConfig) {
    let server = &config.server;
    validate_url_scheme(errors, "server.base_url", &server.base_url, &["http://", "https://"]);
    validate_url_scheme(errors, "server.push_url", &server.push_url, &["ws://", "wss://"]);
    validate_range(
        errors,
        "server.request_timeout_secs",
        server.request_timeout_secs,
        1,
        120,
    );
}

pub(super) fn validate_sync(errors: &mut Vec<String>, config: &MosaicConfig) {
    validate_range(errors, "sync.low_water_mark", config.sync.low_water_mark, 1, 1000);
}

pub(super) fn validate_push(errors: &mut Vec<String>, config: &MosaicConfig) {
    let push = &config.push;
    validate_range(
        errors,
        "push.connect_timeout_secs",
        push.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "push.reconnect_delay_secs",
        push.reconnect_delay_secs,
        1,
        60,
    );
    validate_range(
        errors,
        "push.max_reconnect_delay_secs",
        push.max_reconnect_delay_secs,
        push.reconnect_delay_secs,
        600,
    );
}

pub(super) fn clamp_server(config: &mut MosaicConfig) {
    let defaults = ServerConfig::default();
    let server = &mut config.server;
    reset_url_scheme(&mut server.base_url, defaults.base_url, &["http://", "https://"]);
    reset_url_scheme(&mut server.push_url, defaults.push_url, &["ws://", "wss://"]);
    clamp_range(&mut server.request_timeout_secs, 1, 120);
}

pub(super) fn clamp_sync(config: &mut MosaicConfig) {
    clamp_range(&mut config.sync.low_water_mark, 1, 1000);
}

pub(super) fn clamp_push(config: &mut MosaicConfig) {
    let push = &mut config.push;
    clamp_range(&mut push.connect_timeout_secs, 1, 120);
    clamp_range(&mut push.reconnect_delay_secs, 1, 60);
    clamp_range(&mut push.max_reconnect_delay_secs, push.reconnect_delay_secs, 600);
}
