
use std::fmt;


/// Where an image command takes its picture from. Exactly one source may be given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Avatar(String),
    Attachment(String),
    ExplicitUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousImageSource;

impl fmt::Display for AmbiguousImageSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Something went wrong, please try again")
    }
}

impl ImageSource {

    /// Picks the single supplied source, falling back to the invoker's avatar when none is given.
    pub fn select(invoker_avatar: String,
                  user_avatar: Option<String>,
                  attachment: Option<String>,
                  explicit_url: Option<String>) -> Result<ImageSource, AmbiguousImageSource> {
        match (user_avatar, attachment, explicit_url) {
            (None, None, None)      => Ok(ImageSource::Avatar(invoker_avatar)),
            (Some(avatar), None, None) => Ok(ImageSource::Avatar(avatar)),
            (None, Some(url), None) => Ok(ImageSource::Attachment(url)),
            (None, None, Some(url)) => Ok(ImageSource::ExplicitUrl(url)),
            _                       => Err(AmbiguousImageSource),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ImageSource::Avatar(url)
            | ImageSource::Attachment(url)
            | ImageSource::ExplicitUrl(url) => url,
        }
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    fn me() -> String {
        "https://cdn/me.png".to_string()
    }

    #[test]
    fn defaults_to_invoker_avatar() {
        assert_eq!(ImageSource::select(me(), None, None, None), Ok(ImageSource::Avatar(me())));
    }

    #[test]
    fn single_sources_are_taken_verbatim() {
        let url = "https://x/y.png".to_string();
        assert_eq!(ImageSource::select(me(), Some(url.clone()), None, None).unwrap().url(), url);
        assert_eq!(ImageSource::select(me(), None, Some(url.clone()), None), Ok(ImageSource::Attachment(url.clone())));
        assert_eq!(ImageSource::select(me(), None, None, Some(url.clone())), Ok(ImageSource::ExplicitUrl(url)));
    }

    #[test]
    fn two_sources_are_rejected() {
        let url = "https://x/y.png".to_string();
        assert_eq!(ImageSource::select(me(), Some(url.clone()), Some(url.clone()), None), Err(AmbiguousImageSource));
        assert_eq!(ImageSource::select(me(), None, Some(url.clone()), Some(url)), Err(AmbiguousImageSource));
    }
}
