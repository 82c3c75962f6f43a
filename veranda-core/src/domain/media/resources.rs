use uuid::Uuid;
use veranda_model::{Attachment, Event, EventPatch, Property, PropertyPatch};

use super::MediaResource;

impl MediaResource for Event {
    const NOUN: &'static str = "Event";
    const URL_SEGMENT: &'static str = "events";

    type Patch = EventPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn images(&self) -> &[Attachment] {
        &self.images
    }

    fn videos(&self) -> &[Attachment] {
        &self.videos
    }

    fn set_attachments(&mut self, images: Vec<Attachment>, videos: Vec<Attachment>) {
        self.images = images;
        self.videos = videos;
    }

    fn apply_patch(&mut self, patch: EventPatch) {
        self.apply(patch);
    }
}

impl MediaResource for Property {
    const NOUN: &'static str = "Property";
    const URL_SEGMENT: &'static str = "properties";

    type Patch = PropertyPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn images(&self) -> &[Attachment] {
        &self.images
    }

    fn videos(&self) -> &[Attachment] {
        &self.videos
    }

    fn set_attachments(&mut self, images: Vec<Attachment>, videos: Vec<Attachment>) {
        self.images = images;
        self.videos = videos;
    }

    fn apply_patch(&mut self, patch: PropertyPatch) {
        self.apply(patch);
    }
}
