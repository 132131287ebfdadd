use anyhow::{anyhow, Result};
use clap::Args;
use minisite_renderer::renderer::INVALID_VIDEO;
use minisite_renderer::{map_embed_url, messaging_url, resolve_embed};

#[derive(Debug, Args)]
pub struct EmbedArgs {
    /// Video link, or address/phone number with --map/--messaging
    pub input: String,

    /// Treat input as a street address
    #[arg(long, conflicts_with = "messaging")]
    pub map: bool,

    /// Treat input as a phone number
    #[arg(long)]
    pub messaging: bool,

    /// Prefilled message for --messaging
    #[arg(long, requires = "messaging")]
    pub text: Option<String>,
}

pub fn embed(args: EmbedArgs, _cwd: &str) -> Result<()> {
    println!("{}", embed_url(&args)?);
    Ok(())
}

fn embed_url(args: &EmbedArgs) -> Result<String> {
    if args.map {
        return Ok(map_embed_url(&args.input));
    }
    if args.messaging {
        return Ok(messaging_url(&args.input, args.text.as_deref()));
    }

    let resolved = resolve_embed(&args.input);
    if resolved.is_empty() {
        return Err(anyhow!(INVALID_VIDEO));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> EmbedArgs {
        EmbedArgs {
            input: input.to_string(),
            map: false,
            messaging: false,
            text: None,
        }
    }

    #[test]
    fn test_video_links() {
        assert_eq!(
            embed_url(&args("https://youtu.be/dQw4w9WgXcQ")).unwrap(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            embed_url(&args("https://vimeo.com/123456")).unwrap(),
            "https://player.vimeo.com/video/123456"
        );
    }

    #[test]
    fn test_rejected_video_is_an_error() {
        assert!(embed_url(&args("https://example.com/watch")).is_err());
        assert!(embed_url(&args("javascript:alert(1)")).is_err());
    }

    #[test]
    fn test_messaging_link() {
        let args = EmbedArgs {
            messaging: true,
            text: Some("Hi".to_string()),
            ..args("+55 (11) 99999-9999")
        };
        assert_eq!(embed_url(&args).unwrap(), "https://wa.me/5511999999999?text=Hi");
    }
}
