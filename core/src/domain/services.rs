//! Well-known service names.
//!
//! lsof prints service names instead of port numbers unless `-P` is given,
//! so addresses such as `35.186.224.47:https` still have to resolve to a
//! port. Only the common entries of `/etc/services` are covered.

const WELL_KNOWN: &[(&str, u16)] = &[
    ("ftp-data", 20),
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("domain", 53),
    ("bootps", 67),
    ("bootpc", 68),
    ("http", 80),
    ("pop3", 110),
    ("ntp", 123),
    ("imap", 143),
    ("snmp", 161),
    ("ldap", 389),
    ("https", 443),
    ("microsoft-ds", 445),
    ("submission", 587),
    ("ldaps", 636),
    ("imaps", 993),
    ("pop3s", 995),
    ("mdns", 5353),
    ("postgresql", 5432),
    ("http-alt", 8080),
];

/// Look up the registered port of a service name (case-insensitive).
pub fn port_by_name(name: &str) -> Option<u16> {
    WELL_KNOWN
        .iter()
        .find(|(service, _)| service.eq_ignore_ascii_case(name))
        .map(|(_, port)| *port)
}
