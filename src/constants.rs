//! Application constants for the KPI Game client
//!
//! Endpoint paths, storage keys, route paths, report filters and the
//! user-facing messages shown by the auth flow and the dashboard.

// =============================================================================
// Campaign API
// =============================================================================

/// Default base URL of the campaign API
pub const DEFAULT_BASE_URL: &str = "https://api.superlikerslabs.com/v1";

/// Default campaign identifier
pub const DEFAULT_CAMPAIGN: &str = "4u";

/// Endpoint paths relative to the base URL
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login";
    pub const SIGNUP: &str = "/auth/signup";
    pub const LOGOUT: &str = "/auth/logout";
    pub const REPORT: &str = "entries/index";
}

// =============================================================================
// KPI report
// =============================================================================

/// Entry type filter selecting externally loaded records
pub const REPORT_ENTRY_TYPE: &str = "External";

/// Activity type filter selecting advance-toward-goal records
pub const REPORT_ACTIVITY_TYPE: &str = "avance_metas";

/// Row limit sent with the report request (0 = unbounded)
pub const REPORT_UNBOUNDED_LIMIT: u32 = 0;

/// Default reporting window (inclusive)
pub const DEFAULT_REPORT_START: &str = "2024-08-01";
pub const DEFAULT_REPORT_END: &str = "2024-08-31";

/// Wire format for report dates
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Session persistence
// =============================================================================

/// Storage keys for the persisted session
pub mod storage_keys {
    pub const TOKEN: &str = "auth_token";
    pub const USER: &str = "user_data";
}

/// Application directory name under the user's config/data dirs
pub const APP_DIR_NAME: &str = "kpi-game";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const CONFIG_FILE_NAME: &str = "config.json";

// =============================================================================
// Environment overrides
// =============================================================================

pub mod env_vars {
    pub const BASE_URL: &str = "KPI_GAME_BASE_URL";
    pub const API_KEY: &str = "KPI_GAME_API_KEY";
    pub const CAMPAIGN: &str = "KPI_GAME_CAMPAIGN";
    pub const SESSION_FILE: &str = "KPI_GAME_SESSION_FILE";
}

// =============================================================================
// Messages
// =============================================================================

pub mod messages {
    pub const LOGIN_TRANSPORT_FAILURE: &str = "Error en los datos del usuario.";
    pub const LOGIN_REJECTED_DEFAULT: &str = "Error en el inicio de sesión";
    pub const LOGIN_INCOMPLETE: &str = "Respuesta de inicio de sesión incompleta.";

    pub const SIGNUP_TRANSPORT_FAILURE: &str = "Error en los datos registrados.";
    pub const SIGNUP_TRANSPORT_FIELD: &str = "Error";
    pub const SIGNUP_TRANSPORT_FIELD_MESSAGE: &str = "en los datos ingresados.";
    pub const SIGNUP_REJECTED_DEFAULT: &str = "Error en el registro";

    pub const KPI_LOAD_FAILURE: &str =
        "Error al cargar los datos de KPI. Por favor, intenta nuevamente.";

    pub const FIELD_REQUIRED: &str = "Campo requerido";
    pub const FIELD_INVALID_EMAIL: &str = "Email inválido";
    pub const FIELD_PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";
}

// =============================================================================
// Dashboard thresholds
// =============================================================================

/// Percentage thresholds for the status tiers
pub mod status_thresholds {
    pub const EXCELLENT: i64 = 90;
    pub const GOOD: i64 = 70;
    pub const FAIR: i64 = 50;
}

/// Width in characters of a rendered gauge
pub const GAUGE_WIDTH: usize = 30;

/// Minimum lengths enforced by the signup form
pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PASSWORD_LENGTH: usize = 6;
