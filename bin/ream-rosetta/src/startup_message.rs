use ream_network_spec::constants::{MIDDLEWARE_VERSION, NODE_VERSION, ROSETTA_VERSION};

pub fn startup_message() -> String {
    format!(
        "
 ███████████   ██████████   █████████   ██████   ██████
▒▒███▒▒▒▒▒███ ▒▒███▒▒▒▒▒█  ███▒▒▒▒▒███ ▒▒██████ ██████ 
 ▒███    ▒███  ▒███  █ ▒  ▒███    ▒███  ▒███▒█████▒███ 
 ▒██████████   ▒██████    ▒███████████  ▒███▒▒███ ▒███ 
 ▒███▒▒▒▒▒███  ▒███▒▒█    ▒███▒▒▒▒▒███  ▒███ ▒▒▒  ▒███ 
 ▒███    ▒███  ▒███ ▒   █ ▒███    ▒███  ▒███      ▒███ 
 █████   █████ ██████████ █████   █████ █████     █████
▒▒▒▒▒   ▒▒▒▒▒ ▒▒▒▒▒▒▒▒▒▒ ▒▒▒▒▒   ▒▒▒▒▒ ▒▒▒▒▒     ▒▒▒▒▒ 
                                          rosetta
 Version            : {}
 Rosetta Version    : {ROSETTA_VERSION}
 Middleware Version : {MIDDLEWARE_VERSION}
 Beacon Node        : {NODE_VERSION}
",
        env!("CARGO_PKG_VERSION")
    )
}
