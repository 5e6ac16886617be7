/// Default correlation id length
pub const DEFAULT_CORRELATION_ID_LENGTH: usize = 32;
/// Default correlation id alphabet (62 symbols)
pub const ALPHANUMERIC_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
/// Narrower 17-symbol alphabet kept for wire compatibility with older hives
pub const LEGACY_CHARSET: &str = "abcdefg1234567890";
/// Default number of workers spawned per `workers` entry
pub const DEFAULT_WORKER_COUNT: usize = 1;
