//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Mosaic Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# base_url = "http://localhost:8000"
# push_url = "ws://localhost:8000/push"
# request_timeout_secs = 10     # 1-120

[sync]
# low_water_mark = 10           # 1-1000, fetch more history below this many events
# use_cursor = false            # send the oldest loaded timestamp with pagination fetches

[push]
# connect_timeout_secs = 15     # 1-120
# reconnect_delay_secs = 1      # 1-60
# max_reconnect_delay_secs = 30 # reconnect_delay_secs-600

[logging]
# level = "INFO"                # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
