#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::geometry::*;
    use crate::signal::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use web_time::Duration;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let _sub = sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(42);
        sig.update(|v| *v += 1);
        assert_eq!(*seen.borrow(), vec![42, 43]);
    }

    #[test]
    fn test_subscription_drop_unsubscribes() {
        let sig = signal(0);
        let calls = Rc::new(RefCell::new(0));

        let calls_clone = calls.clone();
        let sub = sig.subscribe(move |_| *calls_clone.borrow_mut() += 1);
        assert_eq!(sig.subscriber_count(), 1);

        sig.set(1);
        drop(sub);
        sig.set(2);

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_cancel_is_idempotent() {
        let sig = signal(0);
        let mut sub = sig.subscribe(|_| {});
        sub.cancel();
        sub.cancel();
        assert!(!sub.is_active());
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_signal() {
        let sig = signal(0);
        let sub = sig.subscribe(|_| {});
        drop(sig);
        // Cancelling against a dropped signal is a no-op.
        drop(sub);
    }

    #[test]
    fn test_subscriber_may_read_and_write_signal() {
        let sig = signal(0);
        let other = sig.clone();
        let _sub = sig.subscribe(move |v| {
            if *v < 3 {
                other.set(other.get() + 1);
            }
        });
        sig.set(1);
        assert_eq!(sig.get(), 3);
    }

    #[test]
    fn test_set_if_changed() {
        let sig = signal(Size::new(10.0, 20.0));
        let calls = Rc::new(RefCell::new(0));
        let calls_clone = calls.clone();
        let _sub = sig.subscribe(move |_| *calls_clone.borrow_mut() += 1);

        assert!(!sig.set_if_changed(Size::new(10.0, 20.0)));
        assert!(sig.set_if_changed(Size::new(10.0, 30.0)));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
        assert_eq!(rect.max_y(), 60.0);
        assert_eq!(rect.max_x(), 110.0);
    }

    #[test]
    fn test_edge_insets_builders() {
        let insets = EdgeInsets::top(20.0).with_bottom(5.0);
        assert_eq!(insets, EdgeInsets::new(20.0, 0.0, 5.0, 0.0));
        assert_eq!(insets.with_top(0.0).top, 0.0);
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);

        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        assert!(!a.update());
        assert!((*a.get() - 10.0).abs() < 0.001);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_animation_retarget_starts_from_current() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
        );
        a.set_target(1.0);
        clock.advance(Duration::from_millis(50));
        a.update();

        a.set_target(0.0);
        assert!((*a.get() - 0.5).abs() < 1e-4);
        clock.advance(Duration::from_millis(50));
        a.update();
        assert!((*a.get() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_instant_animation_lands_on_first_update() {
        let _clock = TestClock::install();
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::instant());
        a.set_target(1.0);
        assert!(!a.update());
        assert_eq!(*a.get(), 1.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for e in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!((e.interpolate(0.0)).abs() < 1e-6, "{e:?}");
            assert!((e.interpolate(1.0) - 1.0).abs() < 1e-6, "{e:?}");
        }
    }
}
