//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::geo::ApiProvider;
use crate::link::LinkStyle;
use crate::rank::RankingMode;

/// Default geocoding API provider
pub const DEFAULT_API_PROVIDER: ApiProvider = ApiProvider::FreeGeocodingApi;

/// Default map link style
pub const DEFAULT_MAP_LINK_STYLE: LinkStyle = LinkStyle::Google;

/// Default sort mode for place listings
pub const DEFAULT_SORT: RankingMode = RankingMode::Distance;

/// Default radius filter in kilometers (zero disables filtering)
pub const DEFAULT_RADIUS_KM: f64 = 0.0;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "placemark";
