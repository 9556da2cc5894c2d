use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use super::{parse, Fetcher, HeadResult, Page};

const USER_AGENT: &str = concat!("bmc/", env!("CARGO_PKG_VERSION"));

/// [`Fetcher`] backed by libcurl easy handles. Follows redirects.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlFetcher;

fn ensure_success(method: &str, url: &str, code: u32) -> Result<()> {
    if !(200..300).contains(&code) {
        anyhow::bail!("{} {} returned HTTP {}", method, url, code);
    }
    Ok(())
}

/// libcurl reads a zero timeout as "no timeout".
const MIN_TIMEOUT: Duration = Duration::from_millis(100);

fn new_handle(url: &str, timeout: Duration) -> Result<curl::easy::Easy> {
    let timeout = timeout.max(MIN_TIMEOUT);
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;
    Ok(easy)
}

impl Fetcher for CurlFetcher {
    fn get_page(&self, url: &str, timeout: Duration, max_bytes: usize) -> Result<Page> {
        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;

        let mut easy = new_handle(url, timeout)?;
        // Empty string enables every encoding libcurl was built with.
        easy.accept_encoding("")?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                let room = max_bytes.saturating_sub(body.len());
                if data.len() > room {
                    body.extend_from_slice(&data[..room]);
                    truncated = true;
                    // Short count aborts the transfer.
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        if let Err(e) = performed {
            if !(truncated && e.is_write_error()) {
                return Err(e).with_context(|| format!("GET {} failed", url));
            }
            tracing::trace!(url, max_bytes, "page body truncated");
        }

        let code = easy.response_code().context("no response code")?;
        ensure_success("GET", url, code)?;

        let final_url = easy
            .effective_url()?
            .map(str::to_string)
            .unwrap_or_else(|| url.to_string());

        Ok(Page {
            url: final_url,
            body: String::from_utf8_lossy(&body).into_owned(),
            truncated,
        })
    }

    fn head(&self, url: &str, timeout: Duration) -> Result<HeadResult> {
        let mut headers: Vec<String> = Vec::new();

        let mut easy = new_handle(url, timeout)?;
        easy.nobody(true)?; // HEAD request

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform().with_context(|| format!("HEAD {} failed", url))?;
        }

        let code = easy.response_code().context("no response code")?;
        ensure_success("HEAD", url, code)?;

        Ok(parse::parse_headers(&headers))
    }
}
