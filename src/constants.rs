/// ======================= Token API =======================
/// Pinax Token API base URL - public endpoint, the key travels in the auth header
pub const TOKEN_API_URL: &str = "https://token-api.thegraph.com";

/// Env var holding the Token API bearer token
pub const TOKEN_API_KEY_ENV: &str = "TOKEN_API_KEY";

/// ======================= Paging =======================
pub const TRANSFER_PAGE_SIZE: usize = 10;
pub const MAX_TRANSFER_PAGES: u32 = 20;
pub const MAX_TRANSFER_RECORDS: usize = 50;

/// Rows requested when looking up token metadata
pub const METADATA_LIMIT: usize = 10;

/// ======================= Native token sentinels =======================
/// Placeholder contract the upstream reports for native EVM transfers
pub const EVM_NATIVE_CONTRACT: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Native SOL mint
pub const SVM_NATIVE_MINT: &str = "So11111111111111111111111111111111111111111";

/// Tron zero address, reported for native TRX transfers
pub const TVM_NATIVE_CONTRACT: &str = "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb";

/// ======================= Supply =======================
/// Solana only serves USDC through HydroScan, upstream has no SVM metadata yet
pub const SVM_TOKEN_SUPPLY: f64 = 11_582_837_136.0;

/// The aquarium classifies against supply / SUPPLY_MODIFIER
pub const SUPPLY_MODIFIER: f64 = 100.0;

/// ======================= Classifier =======================
/// Ratio substituted when value / supply is not finite
pub const FALLBACK_SUPPLY_RATIO: f64 = 0.000_001;

/// Ratio at which the in-tier value boost saturates
pub const VALUE_BOOST_CAP: f64 = 0.001;

/// Largest extra scale the value boost can add
pub const VALUE_BOOST_MAX: f64 = 0.2;

/// ======================= Rendering =======================
pub const POLL_INTERVAL_SECS: u64 = 10;
pub const SPRITE_BASE_SIZE: f64 = 80.0;
pub const SPRITE_FRAME_COUNT: u32 = 4;
pub const SPRITE_ANIMATION_DURATION: f64 = 0.5;
pub const ENTRANCE_DELAY_DIVISOR: f64 = 5.0;
