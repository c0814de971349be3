use ream_api_types_rosetta::network::OperationStatus;

/// Version of the beacon node this integration is built against.
pub const NODE_VERSION: &str = "1.0.5";
pub const ROSETTA_VERSION: &str = "1.4.10";
pub const MIDDLEWARE_VERSION: &str = "0.0.1";

pub const HISTORICAL_BALANCE_SUPPORTED: bool = false;

pub const SUCCESS_STATUS: &str = "SUCCESS";
pub const FAILURE_STATUS: &str = "FAILURE";

pub const INPUT_OP_TYPE: &str = "INPUT";
pub const OUTPUT_OP_TYPE: &str = "OUTPUT";
pub const COINBASE_OP_TYPE: &str = "COINBASE";

pub const OPERATION_TYPES: [&str; 3] = [INPUT_OP_TYPE, OUTPUT_OP_TYPE, COINBASE_OP_TYPE];

pub fn operation_statuses() -> Vec<OperationStatus> {
    vec![
        OperationStatus {
            status: SUCCESS_STATUS.to_string(),
            successful: true,
        },
        OperationStatus {
            status: FAILURE_STATUS.to_string(),
            successful: false,
        },
    ]
}
