use tracing::info;
use url::Url;

use crate::app::Result;
use crate::config::SessionConfig;
use crate::view::View;

/// Open the start page, run `query` through the search box and wait until
/// the first listing entry is present.
pub async fn open_search<V: View>(view: &V, session: &SessionConfig, query: &str) -> Result<()> {
    let start = Url::parse(&session.start_url)?;

    info!(url = %start, "Opening start page");
    view.navigate_to(start.as_str()).await?;
    view.wait_fixed(session.after_navigate()).await;

    view.fill_field(&session.search_box, query).await?;
    view.press_key("Enter").await?;
    view.wait_fixed(session.after_search()).await;

    view.wait_for_selector(&session.listing, session.list_ready_timeout())
        .await?;
    info!(query, "Search results ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CartographError;
    use crate::view::mock::{Gesture, MockView};

    #[test]
    fn test_bootstrap_sequence() {
        let session = SessionConfig::default();
        let view = MockView::new(session.listing.clone(), vec![]);

        tokio_test::block_on(open_search(&view, &session, "coffee in Galway")).unwrap();

        assert_eq!(
            view.gestures(),
            vec![
                Gesture::Navigate("https://www.google.com/maps".to_string()),
                Gesture::Wait(session.after_navigate()),
                Gesture::Fill("coffee in Galway".to_string()),
                Gesture::Key("Enter".to_string()),
                Gesture::Wait(session.after_search()),
            ]
        );
    }

    #[test]
    fn test_invalid_start_url_fails_before_navigation() {
        let session = SessionConfig {
            start_url: "not a url".to_string(),
            ..SessionConfig::default()
        };
        let view = MockView::new(session.listing.clone(), vec![]);

        let err = tokio_test::block_on(open_search(&view, &session, "q")).unwrap_err();
        assert!(matches!(err, CartographError::InvalidUrl(_)));
        assert!(view.gestures().is_empty());
    }

    #[test]
    fn test_listing_never_appears() {
        let session = SessionConfig::default();
        let view = MockView::failing();

        let result = tokio_test::block_on(open_search(&view, &session, "q"));
        assert!(result.is_err());
    }
}
