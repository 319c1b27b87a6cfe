// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;

#[test]
fn test_defaults_load_without_config_files() {
    let settings = Settings::new().expect("defaults should always load");

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.session.root, "./sessions");

    // Behavior window matches the documented 2.5-5.0s pause range
    assert_eq!(settings.behavior.min_delay_ms, 2500);
    assert_eq!(settings.behavior.max_delay_ms, 5000);
    assert!(settings.behavior.min_delay_ms <= settings.behavior.max_delay_ms);
    assert!((0.0..=1.0).contains(&settings.behavior.wheel_probability));

    assert_eq!(settings.crawler.stall_threshold, 10);
    assert!(settings.crawler.results_wait_ms >= settings.crawler.fallback_wait_ms);
}
