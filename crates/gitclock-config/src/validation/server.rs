//! Embedded editor endpoint validation.

use std::net::IpAddr;

use crate::schema::GitClockConfig;

use super::helpers::validate_range;

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &GitClockConfig) {
    validate_range(errors, "server.port", u64::from(config.server.port), 1, 65535);

    if config.server.bind.parse::<IpAddr>().is_err() {
        errors.push(format!(
            "server.bind = {:?} is not an IP address",
            config.server.bind
        ));
    }
}
