use std::path::PathBuf;

use serenity::async_trait;
use tracing::error;

use crate::catalog::Catalog;
use crate::sampler::{CaptionSampler, ImageSampler};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const GREETING: &str = "Hi! Press the button to find out which tiger you are today:";
pub const ANOTHER_PROMPT: &str = "Want another tiger?";
pub const NO_DATA_NOTICE: &str = "No tiger data available.";
pub const IMAGE_MISSING_NOTICE: &str = "Error: image not found.";
pub const TRY_AGAIN_NOTICE: &str = "Something went wrong. Try again later.";

/// Delivery boundary for one chat destination. `offer_another` attaches the
/// follow-up affordance (a button, on Discord) to the message.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn send_text(&self, text: &str, offer_another: bool) -> Result<(), BoxError>;

    async fn send_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), BoxError>;
}

/// Orchestrates one image+caption pairing per request. Stateless between
/// calls; all state lives in the image sampler's served-set.
pub struct PairingService {
    images: ImageSampler,
    captions: CaptionSampler,
    image_dir: PathBuf,
}

impl PairingService {
    pub fn new(catalog: Catalog, image_dir: PathBuf) -> Self {
        Self {
            images: ImageSampler::new(catalog.images),
            captions: CaptionSampler::new(catalog.captions),
            image_dir,
        }
    }

    /// Greets and offers the button without sampling anything.
    pub async fn on_start(&self, sink: &dyn OutputSink) -> Result<(), BoxError> {
        sink.send_text(GREETING, true).await
    }

    pub async fn on_request(&self, sink: &dyn OutputSink) -> Result<(), BoxError> {
        if self.images.is_empty() || self.captions.is_empty() {
            return sink.send_text(NO_DATA_NOTICE, false).await;
        }

        let image = self.images.next();
        let caption = self.captions.next();

        let path = self.image_dir.join(&image);
        match tokio::fs::read(&path).await {
            Ok(bytes) => sink.send_image(bytes, &image, &caption).await?,
            Err(e) => {
                // The drawn index stays served; the entry is not re-rolled.
                error!("Image file missing or unreadable: {}: {}", path.display(), e);
                sink.send_text(IMAGE_MISSING_NOTICE, false).await?;
            }
        }

        // Offered after a served image and after a missing one alike.
        sink.send_text(ANOTHER_PROMPT, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq)]
    enum Sent {
        Text {
            text: String,
            offer_another: bool,
        },
        Image {
            filename: String,
            caption: String,
            bytes: Vec<u8>,
        },
    }

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<Sent>>,
    }

    impl RecordingSink {
        fn take(&self) -> Vec<Sent> {
            std::mem::take(&mut *self.sent.lock().unwrap())
        }
    }

    #[async_trait]
    impl OutputSink for RecordingSink {
        async fn send_text(&self, text: &str, offer_another: bool) -> Result<(), BoxError> {
            self.sent.lock().unwrap().push(Sent::Text {
                text: text.to_string(),
                offer_another,
            });
            Ok(())
        }

        async fn send_image(
            &self,
            bytes: Vec<u8>,
            filename: &str,
            caption: &str,
        ) -> Result<(), BoxError> {
            self.sent.lock().unwrap().push(Sent::Image {
                filename: filename.to_string(),
                caption: caption.to_string(),
                bytes,
            });
            Ok(())
        }
    }

    fn fixture(images: &[(&str, &[u8])], captions: &[&str]) -> (TempDir, PairingService) {
        let dir = TempDir::new().unwrap();
        for (name, bytes) in images {
            std::fs::write(dir.path().join(name), bytes).unwrap();
        }
        let catalog = Catalog {
            images: images.iter().map(|(name, _)| name.to_string()).collect(),
            captions: captions.iter().map(|c| c.to_string()).collect(),
        };
        let service = PairingService::new(catalog, dir.path().to_path_buf());
        (dir, service)
    }

    #[tokio::test]
    async fn empty_catalog_sends_a_single_no_data_notice() {
        let service = PairingService::new(Catalog::default(), PathBuf::from("nowhere"));
        let sink = RecordingSink::default();

        service.on_request(&sink).await.unwrap();
        assert_eq!(
            sink.take(),
            vec![Sent::Text {
                text: NO_DATA_NOTICE.to_string(),
                offer_another: false,
            }]
        );
    }

    #[tokio::test]
    async fn serves_image_with_caption_then_follow_up() {
        let (_dir, service) = fixture(&[("a.jpg", b"stripes")], &["X"]);
        let sink = RecordingSink::default();

        service.on_request(&sink).await.unwrap();
        assert_eq!(
            sink.take(),
            vec![
                Sent::Image {
                    filename: "a.jpg".to_string(),
                    caption: "X".to_string(),
                    bytes: b"stripes".to_vec(),
                },
                Sent::Text {
                    text: ANOTHER_PROMPT.to_string(),
                    offer_another: true,
                },
            ]
        );
    }

    #[tokio::test]
    async fn missing_file_sends_not_found_then_follow_up() {
        let (dir, service) = fixture(&[("a.jpg", b"stripes")], &["X"]);
        std::fs::remove_file(dir.path().join("a.jpg")).unwrap();
        let sink = RecordingSink::default();

        service.on_request(&sink).await.unwrap();
        assert_eq!(
            sink.take(),
            vec![
                Sent::Text {
                    text: IMAGE_MISSING_NOTICE.to_string(),
                    offer_another: false,
                },
                Sent::Text {
                    text: ANOTHER_PROMPT.to_string(),
                    offer_another: true,
                },
            ]
        );

        // Later requests are still served.
        service.on_request(&sink).await.unwrap();
        assert_eq!(sink.take().len(), 2);
    }

    #[tokio::test]
    async fn two_image_catalog_cycles_without_repeats() {
        let (_dir, service) = fixture(&[("a.jpg", b"a"), ("b.jpg", b"b")], &["X", "Y"]);
        let sink = RecordingSink::default();

        let mut first_cycle = Vec::new();
        for _ in 0..2 {
            service.on_request(&sink).await.unwrap();
            match sink.take().into_iter().next().unwrap() {
                Sent::Image { filename, .. } => first_cycle.push(filename),
                other => panic!("expected an image, got {other:?}"),
            }
        }
        first_cycle.sort();
        assert_eq!(first_cycle, vec!["a.jpg", "b.jpg"]);

        // Third request starts a new cycle and may repeat either image.
        service.on_request(&sink).await.unwrap();
        match sink.take().into_iter().next().unwrap() {
            Sent::Image { filename, .. } => {
                assert!(filename == "a.jpg" || filename == "b.jpg");
            }
            other => panic!("expected an image, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn start_greets_with_follow_up_and_samples_nothing() {
        let service = PairingService::new(Catalog::default(), PathBuf::from("nowhere"));
        let sink = RecordingSink::default();

        service.on_start(&sink).await.unwrap();
        assert_eq!(
            sink.take(),
            vec![Sent::Text {
                text: GREETING.to_string(),
                offer_another: true,
            }]
        );
    }
}
