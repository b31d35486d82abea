//! Per-request loading of the requester's state.

use sipwise_core::{FeedbackStore, InteractionStore, PreferenceStore, StoreError, UserId, UserSignals};

/// Load everything the pipeline knows about `user`.
///
/// Each collaborator read is independent: a failure is logged, that part
/// of the snapshot is left empty and its area is marked unavailable while
/// the rest still loads.
#[must_use]
pub fn load_signals<S>(store: &S, user: UserId) -> UserSignals
where
    S: PreferenceStore + InteractionStore + FeedbackStore + ?Sized,
{
    let mut signals = UserSignals::empty(user);
    let interactions = degrade(store.interactions(user), &mut signals);
    let feedback = degrade(store.feedback(user), &mut signals);
    let profile = degrade(store.profile(user), &mut signals);
    let filter = degrade(store.active_filter(user), &mut signals);
    signals.profile = profile;
    signals.filter = filter;
    signals.with_interactions(interactions).with_feedback(feedback)
}

fn degrade<T: Default>(result: Result<T, StoreError>, signals: &mut UserSignals) -> T {
    result.unwrap_or_else(|err| {
        log::warn!("treating {} as empty for {}: {err}", err.area(), signals.user);
        signals.unavailable.insert(err.area());
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sipwise_core::{
        DrinkId, Feedback, FeedbackKind, Interaction, PreferenceProfile, StoreArea,
        test_support::MemoryStore,
    };

    const USER: UserId = UserId(4);

    fn store() -> MemoryStore {
        MemoryStore::default()
            .with_profile(USER, PreferenceProfile::default())
            .with_interaction(Interaction::new(USER, DrinkId(1)).favorite())
            .with_feedback(Feedback::new(USER, DrinkId(2), FeedbackKind::TooSweet))
    }

    #[rstest]
    fn healthy_store_loads_every_signal() {
        let signals = load_signals(&store(), USER);
        assert!(signals.profile.is_some());
        assert!(signals.is_favorite(DrinkId(1)));
        assert!(signals.has_feedback(DrinkId(2), FeedbackKind::TooSweet));
    }

    #[rstest]
    #[case(StoreArea::Preferences)]
    #[case(StoreArea::Interactions)]
    #[case(StoreArea::Feedback)]
    fn one_failing_area_leaves_the_others_intact(#[case] area: StoreArea) {
        let signals = load_signals(&store().with_failure(area), USER);
        assert_eq!(signals.profile.is_some(), area != StoreArea::Preferences);
        assert_eq!(signals.is_favorite(DrinkId(1)), area != StoreArea::Interactions);
        assert_eq!(
            signals.has_feedback(DrinkId(2), FeedbackKind::TooSweet),
            area != StoreArea::Feedback
        );
        assert_eq!(signals.unavailable.iter().copied().collect::<Vec<_>>(), vec![area]);
    }

    #[rstest]
    fn healthy_reads_mark_nothing_unavailable() {
        assert!(load_signals(&store(), USER).unavailable.is_empty());
    }
}
