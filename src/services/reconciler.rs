//! Stream reconciliation
//!
//! Turns raw stream database rows into the canonical set used for publishing:
//! sorted by `(channel, url)`, one stream per channel, and enriched with the
//! channel's categories, languages, broadcast area, maturity flag and logo.
//! Nothing in here fails; streams that reference undocumented channels keep
//! their own data and get a broadcast area guessed from their file name.

use tracing::debug;

use super::channel_index::ChannelIndex;
use crate::models::{Channel, Stream};
use crate::utils::{country_code_from_path, order_by, uniq_by};

/// Deduplication identity of a stream
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum StreamIdentity {
    Channel(String),
    /// Unique per channel-less stream within one run
    Synthetic(u64),
}

/// Merges raw streams with channel metadata
#[derive(Debug, Clone, Copy)]
pub struct StreamReconciler<'a> {
    index: &'a ChannelIndex,
}

impl<'a> StreamReconciler<'a> {
    pub fn new(index: &'a ChannelIndex) -> Self {
        Self { index }
    }

    pub fn reconcile(&self, streams: Vec<Stream>) -> Vec<Stream> {
        let total = streams.len();

        // Streams without a channel sort after every stream that has one
        let sorted = order_by(streams, |s| {
            (s.channel.is_none(), s.channel.clone().unwrap_or_default(), s.url.clone())
        });

        let mut next_token = 0u64;
        let unique = uniq_by(sorted, |s| match &s.channel {
            Some(id) => StreamIdentity::Channel(id.clone()),
            None => {
                next_token += 1;
                StreamIdentity::Synthetic(next_token)
            }
        });

        let enriched: Vec<Stream> = unique
            .into_iter()
            .map(|stream| self.enrich(stream))
            .collect();

        debug!(
            "Reconciled {} streams into {} ({} duplicates dropped)",
            total,
            enriched.len(),
            total - enriched.len()
        );
        enriched
    }

    fn enrich(&self, mut stream: Stream) -> Stream {
        match stream.channel_id().and_then(|id| self.index.get_channel(id)) {
            Some(channel) => self.apply_channel(&mut stream, channel),
            None => {
                stream.broadcast_area = stream
                    .filepath
                    .as_deref()
                    .and_then(country_code_from_path)
                    .map(|code| vec![format!("c/{}", code.to_uppercase())])
                    .unwrap_or_default();
            }
        }
        stream
    }

    fn apply_channel(&self, stream: &mut Stream, channel: &Channel) {
        stream.categories = channel
            .categories
            .iter()
            .filter_map(|id| self.index.get_category(id))
            .cloned()
            .collect();
        stream.languages = channel
            .languages
            .iter()
            .filter_map(|code| self.index.get_language(code))
            .cloned()
            .collect();
        stream.broadcast_area = channel.broadcast_area.clone();
        stream.is_nsfw = channel.is_nsfw;
        if let Some(logo) = &channel.logo {
            stream.logo = Some(logo.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Language};
    use proptest::prelude::*;

    fn stream(channel: Option<&str>, url: &str, filepath: &str) -> Stream {
        Stream {
            channel: channel.map(str::to_string),
            name: channel.unwrap_or("Unnamed").to_string(),
            url: url.to_string(),
            filepath: Some(filepath.to_string()),
            ..Stream::default()
        }
    }

    fn index() -> ChannelIndex {
        ChannelIndex::new(
            vec![
                Channel {
                    id: "CNN.us".into(),
                    name: "CNN".into(),
                    country: Some("US".into()),
                    categories: vec!["news".into(), "ghost".into()],
                    languages: vec!["eng".into()],
                    broadcast_area: vec!["c/US".into()],
                    is_nsfw: false,
                    logo: Some("https://logo.example/cnn.png".into()),
                },
                Channel {
                    id: "Night.fr".into(),
                    name: "Night".into(),
                    country: Some("FR".into()),
                    categories: vec![],
                    languages: vec![],
                    broadcast_area: vec!["r/EUR".into()],
                    is_nsfw: true,
                    logo: None,
                },
            ],
            vec![Category {
                id: "news".into(),
                name: "News".into(),
            }],
            vec![Language {
                code: "eng".into(),
                name: "English".into(),
            }],
            vec![],
        )
    }

    #[test]
    fn keeps_smallest_url_per_channel() {
        let index = index();
        let out = StreamReconciler::new(&index).reconcile(vec![
            stream(Some("CNN.us"), "http://z", "us.m3u"),
            stream(Some("CNN.us"), "http://a", "us.m3u"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].url, "http://a");
    }

    #[test]
    fn channel_less_streams_never_collapse() {
        let index = index();
        let out = StreamReconciler::new(&index).reconcile(vec![
            stream(None, "http://same", "fr_news.m3u"),
            stream(None, "http://same", "fr_news.m3u"),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn channel_less_streams_sort_last() {
        let index = index();
        let out = StreamReconciler::new(&index).reconcile(vec![
            stream(None, "http://a", "xx.m3u"),
            stream(Some("Zed.us"), "http://b", "us.m3u"),
            stream(Some("Abc.us"), "http://c", "us.m3u"),
        ]);
        let channels: Vec<_> = out.iter().map(|s| s.channel.as_deref()).collect();
        assert_eq!(channels, vec![Some("Abc.us"), Some("Zed.us"), None]);
    }

    #[test]
    fn enriches_matched_streams() {
        let index = index();
        let mut input = stream(Some("CNN.us"), "http://cnn", "us.m3u");
        input.logo = Some("https://old.example/logo.png".into());

        let out = StreamReconciler::new(&index).reconcile(vec![input]);
        let cnn = &out[0];
        assert_eq!(cnn.categories.len(), 1, "unknown category ids are dropped");
        assert_eq!(cnn.categories[0].name, "News");
        assert_eq!(cnn.languages[0].code, "eng");
        assert_eq!(cnn.broadcast_area, vec!["c/US"]);
        assert_eq!(cnn.logo.as_deref(), Some("https://logo.example/cnn.png"));
    }

    #[test]
    fn channel_without_logo_keeps_stream_logo() {
        let index = index();
        let mut input = stream(Some("Night.fr"), "http://night", "fr.m3u");
        input.logo = Some("https://own.example/logo.png".into());

        let out = StreamReconciler::new(&index).reconcile(vec![input]);
        assert_eq!(out[0].logo.as_deref(), Some("https://own.example/logo.png"));
        assert!(out[0].is_nsfw);
        assert_eq!(out[0].broadcast_area, vec!["r/EUR"]);
    }

    #[test]
    fn unmatched_streams_get_area_from_file_name() {
        let index = index();
        let out = StreamReconciler::new(&index).reconcile(vec![
            stream(Some("Unknown.fr"), "http://a", "fr_news.m3u"),
            stream(None, "http://b", "unsorted.m3u"),
            Stream {
                url: "http://c".into(),
                ..Stream::default()
            },
        ]);
        assert_eq!(out[0].broadcast_area, vec!["c/FR"]);
        assert!(out[1].broadcast_area.is_empty());
        assert!(out[2].broadcast_area.is_empty());
    }

    fn arb_stream() -> impl Strategy<Value = Stream> {
        (
            prop::option::of(prop::sample::select(vec!["A.us", "B.fr", "CNN.us", "Night.fr"])),
            prop::sample::select(vec!["http://1", "http://2", "http://3"]),
            prop::sample::select(vec!["us.m3u", "fr_news.m3u", "misc.m3u"]),
        )
            .prop_map(|(channel, url, file)| stream(channel, url, file))
    }

    proptest! {
        #[test]
        fn reconciliation_is_deterministic(streams in prop::collection::vec(arb_stream(), 0..40)) {
            let index = index();
            let reconciler = StreamReconciler::new(&index);
            let first = reconciler.reconcile(streams.clone());
            let second = reconciler.reconcile(streams);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn one_survivor_per_channel_with_smallest_url(streams in prop::collection::vec(arb_stream(), 0..40)) {
            let index = index();
            let out = StreamReconciler::new(&index).reconcile(streams.clone());

            let channel_less_in = streams.iter().filter(|s| s.channel.is_none()).count();
            let channel_less_out = out.iter().filter(|s| s.channel.is_none()).count();
            prop_assert_eq!(channel_less_in, channel_less_out);

            for survivor in out.iter().filter(|s| s.channel.is_some()) {
                let same: Vec<_> = streams.iter().filter(|s| s.channel == survivor.channel).collect();
                let smallest = same.iter().map(|s| s.url.as_str()).min().unwrap();
                prop_assert_eq!(survivor.url.as_str(), smallest);
                prop_assert_eq!(out.iter().filter(|s| s.channel == survivor.channel).count(), 1);
            }
        }
    }
}
