use yew::prelude::*;

use crate::config::AppConfig;
use crate::models::{CartItem, CourseId};
use crate::notice::{Notice, NoticeAction};
use crate::price::format_idr;

/// Full-page navigation, used for the sign-in page and Snap's redirect fallback.
pub(crate) fn navigate(url: &str) {
    if let Err(err) = gloo_utils::window().location().set_href(url) {
        log::error!("navigation to {} failed: {:?}", url, err);
    }
}

/// A simple, styled button.
#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    /// Button label text
    pub label: String,
    /// Click handler
    pub onclick: Callback<MouseEvent>,
    /// Disable state
    #[prop_or_default]
    pub disabled: bool,
    /// Extra classes, e.g. `ks-button-outline`
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    html! {
        <button
            type="button"
            onclick={props.onclick.clone()}
            disabled={props.disabled}
            class={classes!("ks-button", props.class.clone())}
        >
            { &props.label }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub on_dismiss: Callback<()>,
}

/// Inline replacement for the toast shown after each action.
#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let Some(notice) = &props.notice else {
        return Html::default();
    };

    let action = notice.action.as_ref().map(|action| match action {
        NoticeAction::SignIn { return_to } => {
            let target = AppConfig::from_env().login_redirect(return_to);
            let onclick = Callback::from(move |_: MouseEvent| navigate(&target));
            html! { <Button label="Masuk" {onclick} /> }
        }
    });

    let on_dismiss = props.on_dismiss.clone();
    html! {
        <div class={notice.level.css_class()} role="status" aria-live="polite">
            <strong>{ &notice.title }</strong>
            if let Some(description) = &notice.description {
                <p>{ description }</p>
            }
            { for action }
            <button
                type="button"
                class="ks-notice-dismiss"
                onclick={Callback::from(move |_: MouseEvent| on_dismiss.emit(()))}
            >
                { "×" }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CartItemRowProps {
    pub item: CartItem,
    pub on_remove: Callback<CourseId>,
    #[prop_or_default]
    pub disabled: bool,
}

/// One course in the cart list.
#[function_component(CartItemRow)]
pub fn cart_item_row(props: &CartItemRowProps) -> Html {
    let item = &props.item;
    let onclick = {
        let id = item.id.clone();
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(id.clone()))
    };

    html! {
        <div class="ks-cart-item">
            <img class="ks-cart-item-image" src={item.image_or_placeholder().to_string()} alt={item.title.clone()} />
            <div class="ks-cart-item-body">
                <h3>{ &item.title }</h3>
                <p class="ks-muted">{ format!("Mentor: {}", item.mentor) }</p>
            </div>
            <div class="ks-cart-item-price">{ format_idr(item.price) }</div>
            <Button label="Hapus" {onclick} disabled={props.disabled} class={classes!("ks-button-ghost")} />
        </div>
    }
}
