//! Built-in FAQ corpus used when the config file does not list its own entries.

use crate::types::FaqEntry;

/// Question of the entry that receives the seeded upload image.
pub const ORDER_TRACKING_QUESTION: &str = "How do I track my order?";

const DEFAULT_FAQS: &[(&str, &str)] = &[
    (
        "How can I reset my password?",
        "Click 'Forgot Password' on the login page and follow the email instructions.",
    ),
    (
        ORDER_TRACKING_QUESTION,
        "Open My Orders, select the order and click 'Track Order' for live updates.",
    ),
    (
        "What is your return policy?",
        "We accept returns within 30 days of delivery for unopened and unused items; some categories are excluded.",
    ),
    (
        "How long does delivery take?",
        "Standard delivery: 3–7 business days. Express delivery: 1–2 business days depending on the destination.",
    ),
    (
        "Do you ship internationally?",
        "Yes — we ship to many countries. Shipping fees and delivery times vary by destination.",
    ),
    (
        "How can I contact customer support?",
        "You can email support@example.com or use the contact form on our website for faster routing.",
    ),
    (
        "What payment methods do you accept?",
        "We accept credit/debit cards, PayPal, UPI, netbanking and major wallets.",
    ),
    (
        "Why was my payment declined?",
        "Payment declines can be due to insufficient funds, bank rules, or incorrect card details — try another method or contact your bank.",
    ),
    (
        "Can I cancel my order?",
        "Orders can be cancelled within 1 hour of placement from the My Orders page; after dispatch cancellation may not be possible.",
    ),
    (
        "How do I change my shipping address?",
        "You can change the address within 1 hour of placing the order from My Orders. After that, please contact support.",
    ),
    (
        "Do you offer Cash on Delivery (COD)?",
        "COD is available in selected pin codes — it will show as a payment option during checkout.",
    ),
    (
        "Do you offer warranty or guarantees?",
        "Certain products include manufacturer warranties — warranty details are listed on the product page.",
    ),
    (
        "How do I return a faulty item?",
        "Open a return request in My Orders, select 'Faulty' and follow the instructions. We'll arrange collection or provide a return label.",
    ),
    (
        "How do I apply a promo code?",
        "Enter the promo code in the 'Apply Coupon' field on the cart page before checkout.",
    ),
    (
        "Where can I find the invoice for my order?",
        "Invoices are available in My Orders → Order Details. You can download them as PDF.",
    ),
    (
        "Do you have subscription plans?",
        "Yes — we offer subscription options for select product categories. Check the Subscriptions page for details.",
    ),
    (
        "What should I do if I received the wrong item?",
        "Sorry for the trouble — open a return/replace request in My Orders and choose 'Wrong item received'.",
    ),
    (
        "Are there shipping charges?",
        "Shipping charges depend on the order amount, weight and destination. Free shipping may apply above a threshold.",
    ),
    (
        "How can I change my account email?",
        "Go to Account Settings → Edit Profile → Change email. Verify the new email to apply changes.",
    ),
    (
        "How do I subscribe to order notifications?",
        "Enable notifications in Account Settings or allow notifications in the browser/device prompt.",
    ),
];

/// The built-in e-commerce support corpus, in its fixed order.
pub fn default_faqs() -> Vec<FaqEntry> {
    DEFAULT_FAQS
        .iter()
        .map(|(q, a)| FaqEntry::new(*q, *a))
        .collect()
}

/// Attach `image_url` to the order-tracking entry unless it already has an image.
pub fn attach_tracking_image(entries: &mut [FaqEntry], image_url: &str) -> bool {
    match entries
        .iter_mut()
        .find(|e| e.question == ORDER_TRACKING_QUESTION && e.image.is_none())
    {
        Some(entry) => {
            entry.image = Some(image_url.to_string());
            true
        }
        None => false,
    }
}
