use crate::dto::profile_dto::ProfileUpdateRequest;
use crate::error::Result;
use crate::models::profile::UserProfile;
use crate::services::events::{EventBus, StateEvent};
use crate::store::KvStore;

pub const PROFILE_STORE_KEY: &str = "userProfile";

#[derive(Clone)]
pub struct ProfileService {
    store: KvStore,
    events: EventBus,
}

impl ProfileService {
    pub fn new(store: KvStore, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Stored snapshots are merged with the defaults on every load, so a
    /// profile written by an older build never breaks a reader.
    pub fn load(&self) -> UserProfile {
        self.store
            .get_as::<UserProfile>(PROFILE_STORE_KEY)
            .unwrap_or_default()
    }

    pub fn update(&self, update: ProfileUpdateRequest) -> Result<UserProfile> {
        let mut profile = self.load();

        // Switching gender swaps in that gender's default avatar.
        if let Some(gender) = update.gender {
            if gender != profile.gender {
                profile.avatar = gender.default_avatar().to_string();
            }
            profile.gender = gender;
        }
        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(class) = update.class {
            profile.class = class;
        }
        if let Some(school) = update.school {
            profile.school = school;
        }
        if let Some(date_of_birth) = update.date_of_birth {
            profile.date_of_birth = date_of_birth;
        }
        if let Some(notifications) = update.notifications {
            profile.settings.notifications = notifications;
        }

        self.store.set(PROFILE_STORE_KEY, &profile)?;
        self.events.publish(StateEvent::ProfileUpdated);
        Ok(profile)
    }
}
