//! Integration tests for the cart and checkout flow

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use brewtopia::prelude::*;

fn storefront() -> Result<Storefront<MemorySession, RecordingNotifier>, StorefrontError> {
    Storefront::new(
        Catalog::embedded()?,
        TaxRate::default(),
        MemorySession::new(),
        RecordingNotifier::new(),
    )
}

#[test]
fn adding_the_same_item_twice_keeps_one_entry() -> TestResult {
    let mut storefront = storefront()?;
    let latte = ItemId::from("coffee-3");

    storefront.add_to_cart(&latte)?;
    storefront.add_to_cart(&latte)?;

    assert_eq!(storefront.cart().len(), 1);
    assert_eq!(storefront.cart().get(&latte).map(CartLineItem::quantity), Some(2));
    assert_eq!(storefront.cart().item_count(), 2);

    Ok(())
}

#[test]
fn cart_totals_follow_line_items() -> TestResult {
    let mut storefront = storefront()?;

    assert_eq!(storefront.cart().total_price()?, Money::from_minor(0, USD));

    storefront.add_to_cart(&ItemId::from("coffee-1"))?;
    storefront.add_to_cart(&ItemId::from("coffee-3"))?;
    storefront.add_to_cart(&ItemId::from("coffee-3"))?;

    let totals = storefront.summary()?.totals();

    assert_eq!(totals.subtotal, Money::from_minor(1300, USD));
    assert_eq!(totals.tax, Money::from_minor(104, USD));
    assert_eq!(totals.total, Money::from_minor(1404, USD));

    Ok(())
}

#[test]
fn quantity_changes_and_removals() -> TestResult {
    let mut storefront = storefront()?;
    let espresso = ItemId::from("coffee-1");
    let scone = ItemId::from("light-1");

    storefront.add_to_cart(&espresso)?;
    storefront.add_to_cart(&scone)?;

    assert_eq!(storefront.update_quantity(&espresso, 3), QuantityUpdate::Updated(3));
    assert_eq!(storefront.update_quantity(&scone, 0), QuantityUpdate::Removed);
    assert_eq!(
        storefront.update_quantity(&ItemId::from("main-9"), 2),
        QuantityUpdate::NotFound
    );
    assert!(!storefront.remove_from_cart(&scone));
    assert_eq!(storefront.cart().len(), 1);
    assert_eq!(storefront.cart().total_price()?, Money::from_minor(1050, USD));

    Ok(())
}

#[test]
fn empty_cart_stays_on_cart_with_warning() -> TestResult {
    let mut storefront = storefront()?;

    let result = storefront.proceed_to_payment();

    assert!(matches!(
        result,
        Err(StorefrontError::Checkout(CheckoutError::EmptyCart {
            redirect: Page::Cart
        }))
    ));
    assert_eq!(storefront.stage(), CheckoutStage::Cart);

    let toast = storefront.checkout().notifier().last();

    assert_eq!(toast.as_ref().map(|toast| toast.title.as_str()), Some("Cart is empty"));
    assert_eq!(toast.map(|toast| toast.variant), Some(ToastVariant::Destructive));

    Ok(())
}

#[tokio::test]
async fn paying_cash_confirms_and_empties_cart() -> TestResult {
    let mut storefront = storefront()?;
    let mut rng = StdRng::seed_from_u64(42);

    storefront.add_to_cart(&ItemId::from("dessert-1"))?;
    storefront.proceed_to_payment()?;

    let confirmation = storefront
        .submit_payment(PaymentMethod::Cash, &SimulatedProcessor::instant(), &mut rng)
        .await?;

    assert!(
        confirmation
            .instructions
            .starts_with("Please proceed to the cashier counter")
    );
    assert!(confirmation.order_number.as_str().starts_with("BT-"));
    assert!(storefront.cart().is_empty());
    assert_eq!(storefront.cart().total_price()?, Money::from_minor(0, USD));
    assert_eq!(storefront.stage(), CheckoutStage::Confirmed);

    Ok(())
}

#[test]
fn direct_arrival_at_confirmation_assumes_qris() -> TestResult {
    let mut storefront = storefront()?;

    storefront.add_to_cart(&ItemId::from("tea-2"))?;

    let confirmation = storefront.enter_confirmation(&mut StdRng::seed_from_u64(9));

    assert_eq!(confirmation.payment_method, PaymentMethod::Qris);
    assert_eq!(
        confirmation.instructions,
        "Your payment via QRIS has been confirmed."
    );
    assert!(storefront.cart().is_empty());

    Ok(())
}

#[tokio::test]
async fn cancelled_payment_can_be_retried() -> TestResult {
    let mut storefront = storefront()?;
    let mut rng = StdRng::seed_from_u64(5);
    let slow = SimulatedProcessor::new(Duration::from_secs(3600));
    let cancel = slow.cancel_handle();

    storefront.add_to_cart(&ItemId::from("main-5"))?;
    storefront.proceed_to_payment()?;

    let (result, ()) = tokio::join!(
        storefront.submit_payment(PaymentMethod::Card, &slow, &mut rng),
        async {
            tokio::task::yield_now().await;
            cancel.cancel();
        }
    );

    assert!(matches!(
        result,
        Err(StorefrontError::Checkout(CheckoutError::Processing(
            ProcessingError::Cancelled
        )))
    ));
    assert_eq!(storefront.stage(), CheckoutStage::Payment);
    assert_eq!(storefront.cart().len(), 1);

    let confirmation = storefront
        .submit_payment(PaymentMethod::Card, &SimulatedProcessor::instant(), &mut rng)
        .await?;

    assert_eq!(confirmation.payment_method, PaymentMethod::Card);

    Ok(())
}

#[tokio::test]
async fn order_more_starts_over() -> TestResult {
    let mut storefront = storefront()?;
    let mut rng = StdRng::seed_from_u64(11);

    storefront.add_to_cart(&ItemId::from("coffee-2"))?;
    storefront.proceed_to_payment()?;
    storefront.return_to_cart();
    storefront.proceed_to_payment()?;
    storefront
        .submit_payment(PaymentMethod::Table, &SimulatedProcessor::instant(), &mut rng)
        .await?;
    storefront.start_new_order();

    assert_eq!(storefront.stage(), CheckoutStage::Cart);
    assert!(storefront.cart().is_empty());

    storefront.add_to_cart(&ItemId::from("coffee-2"))?;
    storefront.proceed_to_payment()?;

    assert_eq!(storefront.stage(), CheckoutStage::Payment);

    Ok(())
}

#[test]
fn proceeding_from_payment_stays_on_payment() -> TestResult {
    let mut storefront = storefront()?;

    storefront.add_to_cart(&ItemId::from("coffee-1"))?;
    storefront.proceed_to_payment()?;
    storefront.proceed_to_payment()?;

    assert_eq!(storefront.stage(), CheckoutStage::Payment);

    Ok(())
}

#[tokio::test]
async fn ordering_again_without_starting_over() -> TestResult {
    let mut storefront = storefront()?;
    let mut rng = StdRng::seed_from_u64(13);

    storefront.add_to_cart(&ItemId::from("tea-1"))?;
    storefront.proceed_to_payment()?;
    storefront
        .submit_payment(PaymentMethod::Qris, &SimulatedProcessor::instant(), &mut rng)
        .await?;

    storefront.add_to_cart(&ItemId::from("tea-3"))?;
    storefront.proceed_to_payment()?;

    assert_eq!(storefront.stage(), CheckoutStage::Payment);

    let confirmation = storefront
        .submit_payment(PaymentMethod::Card, &SimulatedProcessor::instant(), &mut rng)
        .await?;

    assert_eq!(confirmation.payment_method, PaymentMethod::Card);
    assert!(storefront.cart().is_empty());

    Ok(())
}
