use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::{MANUAL_CATEGORIES, PAYMENT_METHODS},
};

/// The description suggested for manually added transactions.
pub const DEFAULT_DESCRIPTION: &str = "Manual entry";
/// The amount suggested for manually added transactions.
pub const DEFAULT_AMOUNT: &str = "100";

/// The form for adding a transaction by hand.
///
/// `today` is the default date of the new transaction.
pub fn manual_transaction_form(today: Date) -> Markup {
    html! {
        form
            id="manual-transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="#dashboard-content"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            h3 class="text-lg font-semibold" { "Add Transaction" }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in MANUAL_CATEGORIES {
                        option value=(category) { (category) }
                    }
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    value=(DEFAULT_DESCRIPTION)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    min="1"
                    value=(DEFAULT_AMOUNT)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-2"
                    {
                        input
                            name="type_"
                            id="transaction-type-expense"
                            type="radio"
                            value="expense"
                            checked
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-expense" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Expense"
                        }
                    }

                    div class="flex items-center gap-2"
                    {
                        input
                            name="type_"
                            id="transaction-type-income"
                            type="radio"
                            value="income"
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="transaction-type-income" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Income"
                        }
                    }
                }
            }

            div
            {
                label for="payment_method" class=(FORM_LABEL_STYLE) { "Payment Method" }

                select name="payment_method" id="payment_method" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for method in PAYMENT_METHODS {
                        option value=(method) { (method) }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use time::macros::date;

    use crate::{
        endpoints,
        test_utils::{assert_hx_endpoint, assert_valid_html, must_select, select_count},
        transaction::core::{MANUAL_CATEGORIES, PAYMENT_METHODS},
    };

    use super::manual_transaction_form;

    fn render() -> Html {
        Html::parse_fragment(&manual_transaction_form(date!(2025 - 06 - 30)).into_string())
    }

    #[test]
    fn posts_to_transactions_api() {
        let html = render();
        assert_valid_html(&html);

        let form = must_select(&html, "form#manual-transaction-form");
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_hx_endpoint(&form, "#dashboard-content", "hx-target");
    }

    #[test]
    fn defaults_to_today_and_expense() {
        let html = render();

        let date_input = must_select(&html, "input#date");
        assert_eq!(date_input.value().attr("value"), Some("2025-06-30"));

        let checked = must_select(&html, "input[name=type_][checked]");
        assert_eq!(checked.value().attr("value"), Some("expense"));
        assert_eq!(select_count(&html, "input[name=type_][checked]"), 1);

        let description = must_select(&html, "input#description");
        assert_eq!(description.value().attr("value"), Some("Manual entry"));
    }

    #[test]
    fn lists_menu_options() {
        let html = render();

        assert_eq!(
            select_count(&html, "select#category option"),
            MANUAL_CATEGORIES.len()
        );
        assert_eq!(
            select_count(&html, "select#payment_method option"),
            PAYMENT_METHODS.len()
        );
    }
}
