mod accepts_legacy_flag_syntax_contract;
mod rejects_invalid_configuration_contract;
mod rejects_invalid_request_contract;
