use anyhow::{Context, Result};
use console::{Style, Term};
use rpassword::read_password;
use std::io;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const MIN_SAFE_ENTROPY: f64 = 80.0;
pub const PARANOID_ENTROPY: f64 = 128.0;

pub const MIN_MASTER_BYTES: usize = 12;
pub const MAX_MASTER_BYTES: usize = 1024 * 1024;
pub const MAX_SITE_BYTES: usize = 4096;

pub const MIN_SAFE_PASSWORD_LENGTH: usize = 16;

pub struct InputInfo {
    pub master_byte_length: usize,
    pub master_char_count: usize,
    pub site_key: String,
    pub version: u64,
}

pub struct OutputConfig {
    pub password_length: usize,
    pub charset_size: usize,
}

impl OutputConfig {
    pub fn entropy_bits(&self) -> f64 {
        self.password_length as f64 * (self.charset_size as f64).log2()
    }
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn tree_glyphs(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn status_style(secure: bool, options: &DisplayOptions) -> Style {
    if !options.color_support {
        Style::new()
    } else if secure {
        Style::new().green()
    } else {
        Style::new().yellow()
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

fn control_character_positions(s: &str) -> Vec<usize> {
    s.chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos)
        .collect()
}

fn confirm_control_characters(s: &str, input_name: &str) -> Result<()> {
    let positions = control_character_positions(s);
    if positions.is_empty() {
        return Ok(());
    }

    let term = Term::stderr();

    let warning_msg = format!(
        "WARNING: {} contains {} control character(s) at position(s): {}",
        input_name,
        positions.len(),
        positions
            .iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    term.write_line(&warning_msg)?;
    term.write_str("Continue anyway? [y/N]: ")?;
    term.flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    term.clear_last_lines(2)?;

    if response != "y" && response != "yes" {
        anyhow::bail!("Aborted");
    }

    Ok(())
}

// Prompts go to stderr so stdout carries nothing but the password.
fn prompt_term() -> Term {
    Term::stderr()
}

fn write_prompt(prompt: &str) -> Result<()> {
    let term = prompt_term();
    term.write_str(prompt)?;
    term.flush()?;
    Ok(())
}

fn normalize_input(s: &str) -> String {
    s.trim().nfc().collect()
}

fn normalize_and_validate(s: &str, input_name: &str) -> Result<String> {
    let normalized = normalize_input(s);
    confirm_control_characters(&normalized, input_name)?;
    Ok(normalized)
}

pub fn prompt_master_secret() -> Result<(Zeroizing<Vec<u8>>, usize, usize)> {
    write_prompt("Master secret: ")?;

    let secret = Zeroizing::new(read_password().context("Failed to fetch master secret")?);

    let normalized = Zeroizing::new(normalize_and_validate(&secret, "Master secret")?);
    if normalized.is_empty() {
        anyhow::bail!("Master secret cannot be empty");
    }

    let byte_length = normalized.len();
    if byte_length > MAX_MASTER_BYTES {
        anyhow::bail!(
            "Master secret too long ({} bytes, maximum is {})",
            byte_length,
            MAX_MASTER_BYTES
        );
    }

    let char_count = normalized.chars().count();
    Ok((
        Zeroizing::new(normalized.as_bytes().to_vec()),
        byte_length,
        char_count,
    ))
}

pub fn prompt_site_key(provided: Option<&str>) -> Result<String> {
    let raw = match provided {
        Some(site) => site.to_string(),
        None => {
            write_prompt("Site key: ")?;

            let mut input = String::new();
            io::stdin()
                .read_line(&mut input)
                .context("Failed to read site key")?;
            input
        }
    };

    let normalized = normalize_and_validate(&raw, "Site key")?;
    if normalized.is_empty() {
        anyhow::bail!("Site key cannot be empty");
    }

    if normalized.len() > MAX_SITE_BYTES {
        anyhow::bail!(
            "Site key too long ({} bytes, maximum is {})",
            normalized.len(),
            MAX_SITE_BYTES
        );
    }

    Ok(normalized)
}

pub fn display_output(
    output: &Zeroizing<String>,
    input_info: &InputInfo,
    config: &OutputConfig,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &**output);
    } else {
        println!("\nPassword:\n{}\n", &**output);

        display_settings(input_info, config, options);
        display_stats(config.entropy_bits(), output.chars().count(), config, options);
    }
}

fn display_settings(input_info: &InputInfo, config: &OutputConfig, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_glyphs(options.unicode_support);

    let master_bytes_secure = input_info.master_byte_length >= MIN_MASTER_BYTES;
    let master_style = status_style(master_bytes_secure, options);
    let master_status = if master_bytes_secure {
        check_ok
    } else {
        check_warn
    };

    println!("Settings:");

    println!(
        "  {} Master     {} {} {} ({} {})",
        branch,
        master_style.apply_to(format!("[{}]", master_status)),
        master_style.apply_to(input_info.master_byte_length),
        plural(input_info.master_byte_length, "byte", "bytes"),
        master_style.apply_to(input_info.master_char_count),
        plural(input_info.master_char_count, "char", "chars"),
    );
    println!(
        "  {} Site       {}",
        branch,
        sitepass::normalize_site_key(&input_info.site_key)
    );
    println!("  {} Version    {}", branch, input_info.version);
    println!("  {} Seed       HMAC-SHA256 (256-bit)", branch);
    println!("  {} Keystream  ChaCha20", branch);
    println!("  {} Sampling   Unbiased rejection", branch);
    println!(
        "  {} Classes    Upper, lower, digit, special (>= 1 each)",
        branch
    );
    println!(
        "  {} Output     {} {}",
        last,
        config.password_length,
        plural(config.password_length, "char", "chars")
    );

    println!();
}

fn display_stats(entropy: f64, length: usize, config: &OutputConfig, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_glyphs(options.unicode_support);

    let (status_icon, entropy_style, status_text) = if entropy >= PARANOID_ENTROPY {
        (check_ok, status_style(true, options), "Paranoid")
    } else if entropy >= MIN_SAFE_ENTROPY {
        (check_ok, status_style(true, options), "Strong")
    } else {
        (check_warn, status_style(false, options), "Weak")
    };

    let length_secure = config.password_length >= MIN_SAFE_PASSWORD_LENGTH;
    let length_style = status_style(length_secure, options);
    let length_status = if length_secure { check_ok } else { check_warn };

    println!("Stats:");

    println!(
        "  {} Entropy    {} ~{} bits ({})",
        branch,
        entropy_style.apply_to(format!("[{}]", status_icon)),
        entropy_style.apply_to(format!("{:.1}", entropy)),
        entropy_style.apply_to(status_text)
    );
    println!(
        "  {} Length     {} {} {}",
        branch,
        length_style.apply_to(format!("[{}]", length_status)),
        length_style.apply_to(length),
        plural(length, "char", "chars")
    );
    println!("  {} Charset    {} chars", last, config.charset_size);

    println!(
        "\n{} Security: {}",
        entropy_style.apply_to(format!("[{}]", status_icon)),
        entropy_style.apply_to(status_text)
    );
}
