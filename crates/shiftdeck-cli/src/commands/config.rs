use shiftdeck_core::util::{is_http_url, normalize_text_option};

use crate::config_profiles::{default_config_path, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config_init(
    profile_flag: Option<&str>,
    api_base_url: String,
    access_token: Option<String>,
    user_id: Option<i64>,
) -> Result<(), CliError> {
    let api_base_url = normalize_api_base_url(api_base_url)?;

    let mut config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_flag);
    let existing = config.profile(&profile_name);

    config.upsert_profile(
        &profile_name,
        CliProfile {
            api_base_url: Some(api_base_url),
            access_token: normalize_text_option(access_token).or(existing.access_token),
            user_id: user_id.or(existing.user_id),
        },
    );

    let path = config.save()?;
    println!("Profile '{profile_name}' saved to {}", path.display());
    Ok(())
}

pub fn run_config_show(profile_flag: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_flag);
    let profile = config.profile(&profile_name);

    println!("profile: {profile_name}");
    println!(
        "api_base_url: {}",
        profile.api_base_url.as_deref().unwrap_or("(unset)")
    );
    println!(
        "access_token: {}",
        if profile.access_token.is_some() {
            "[REDACTED]"
        } else {
            "(unset)"
        }
    );
    match profile.user_id {
        Some(user_id) => println!("user_id: {user_id}"),
        None => println!("user_id: (unset)"),
    }
    Ok(())
}

pub fn run_config_path() -> Result<(), CliError> {
    println!("{}", default_config_path()?.display());
    Ok(())
}

pub fn normalize_api_base_url(raw: String) -> Result<String, CliError> {
    let value = normalize_text_option(Some(raw))
        .ok_or_else(|| CliError::Config("API base URL must not be empty".to_string()))?;
    if !is_http_url(&value) {
        return Err(CliError::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
