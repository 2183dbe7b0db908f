use bytes::Bytes;

use crate::config::Config;
use crate::nut::request::Command;

/// Version banner sent for `VER` (and `LOGOUT`).
pub const VERSION_BANNER: &str =
    "Network UPS Tools upsd 2.7.4 \"yolo\" - http://www.networkupstools.org/\n";

/// Error line for `LIST VAR` with a name other than the configured UPS.
pub const ERR_UPS_NOT_FOUND: &str = "ERR UPS not found\n";

/// Error line for every unrecognized request.
pub const ERR_UNKNOWN_COMMAND: &str = "ERR Unknown command\n";

/// Variables reported for the single UPS, in wire order.
pub const UPS_VARIABLES: &[(&str, &str)] = &[
    ("battery.charge", "100"),
    ("battery.charge.low", "10"),
    ("battery.charge.warning", "20"),
    ("battery.mfr.date", "1"),
    ("battery.runtime", "1320"),
    ("battery.runtime.low", "300"),
    ("battery.type", "PbAcid"),
    ("battery.voltage", "260.0"),
    ("battery.voltage.nominal", "120"),
    ("device.mfr", "1"),
    ("device.model", "2200R"),
    ("device.serial", "HIDDEN"),
    ("device.type", "ups"),
    ("driver.name", "usbhid-ups"),
    ("driver.parameter.offdelay", "60"),
    ("driver.parameter.ondelay", "120"),
    ("driver.parameter.pollfreq", "30"),
    ("driver.parameter.pollinterval", "2"),
    ("driver.parameter.port", "auto"),
    ("driver.parameter.synchronous", "no"),
    ("driver.version", "2.7.4"),
    ("driver.version.data", "CyberPower HID 0.4"),
    ("driver.version.internal", "0.41"),
    ("input.transfer.high", "290"),
    ("input.transfer.low", "165"),
    ("input.voltage", "238.7"),
    ("input.voltage.nominal", "230"),
    ("output.voltage", "237.2"),
    ("ups.beeper.status", "enabled"),
    ("ups.delay.shutdown", "60"),
    ("ups.delay.start", "120"),
    ("ups.load", "21"),
    ("ups.mfr", "1"),
    ("ups.model", "2200R"),
    ("ups.productid", "0601"),
    ("ups.realpower.nominal", "2200"),
    ("ups.serial", "HIDDEN"),
    ("ups.status", "OL CHRG"),
    ("ups.timer.shutdown", "-60"),
    ("ups.timer.start", "-60"),
    ("ups.vendorid", "0764"),
];

/// Canned payloads, rendered once at startup and never modified.
///
/// Every payload ends in a line feed and is written to the client as-is.
///
/// # Example
///
/// ```
/// # use mock_upsd::config::Config;
/// # use mock_upsd::nut::request::Command;
/// # use mock_upsd::nut::response::ResponseTable;
/// let table = ResponseTable::new(&Config::default());
/// assert_eq!(
///     &table.respond(&Command::ListVar("bogus"))[..],
///     b"ERR UPS not found\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ResponseTable {
    ups_name: String,
    version: Bytes,
    ups_list: Bytes,
    var_list: Bytes,
    ups_not_found: Bytes,
    unknown_command: Bytes,
}

impl ResponseTable {
    pub fn new(cfg: &Config) -> Self {
        let name = &cfg.ups_name;

        let ups_list = format!(
            "BEGIN LIST UPS\nUPS {} \"{}\"\nEND LIST UPS\n",
            name, cfg.ups_description
        );

        let mut var_list = format!("BEGIN LIST VAR {}\n", name);
        for (var, value) in UPS_VARIABLES {
            var_list.push_str(&format!("VAR {} {} \"{}\"\n", name, var, value));
        }
        var_list.push_str(&format!("END LIST VAR {}\n", name));

        Self {
            ups_name: name.clone(),
            version: Bytes::from_static(VERSION_BANNER.as_bytes()),
            ups_list: Bytes::from(ups_list),
            var_list: Bytes::from(var_list),
            ups_not_found: Bytes::from_static(ERR_UPS_NOT_FOUND.as_bytes()),
            unknown_command: Bytes::from_static(ERR_UNKNOWN_COMMAND.as_bytes()),
        }
    }

    pub fn ups_name(&self) -> &str {
        &self.ups_name
    }

    /// Payload to send back for `command`.
    pub fn respond(&self, command: &Command<'_>) -> &Bytes {
        match command {
            Command::Version => &self.version,
            Command::ListUps => &self.ups_list,
            Command::ListVar(ups) if *ups == self.ups_name => &self.var_list,
            Command::ListVar(_) => &self.ups_not_found,
            // LOGOUT answers with the banner and keeps the connection open
            Command::Logout => &self.version,
            Command::Unknown => &self.unknown_command,
        }
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
