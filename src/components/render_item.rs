//! Render Item Component
//!
//! Generic recursive renderer for a patched item tree. Knows nothing about
//! dynamic data: it maps items to elements, applies per-item style and class
//! overrides, and reports clicks and pointer movement upward.

use leptos::prelude::*;

use crate::models::{
    DynamicClasses, DynamicState, Item, ItemClickEvent, ItemPointerEvent, ItemStyles, PointerPhase,
};

/// Everything a nested item needs, shared down the recursion
#[derive(Clone, Copy)]
struct RenderCtx {
    dynamic_state: Signal<DynamicState>,
    item_styles: Signal<ItemStyles>,
    dynamic_classes: Signal<DynamicClasses>,
    on_item_click: Callback<ItemClickEvent>,
    on_item_pointer: Option<Callback<ItemPointerEvent>>,
}

/// Render a list of items
#[component]
pub fn RenderItems(
    #[prop(into)] items: Signal<Vec<Item>>,
    #[prop(into)] dynamic_state: Signal<DynamicState>,
    #[prop(into)] item_styles: Signal<ItemStyles>,
    #[prop(into)] dynamic_classes: Signal<DynamicClasses>,
    #[prop(into)] on_item_click: Callback<ItemClickEvent>,
    #[prop(optional)] on_item_pointer: Option<Callback<ItemPointerEvent>>,
) -> impl IntoView {
    let ctx = RenderCtx {
        dynamic_state,
        item_styles,
        dynamic_classes,
        on_item_click,
        on_item_pointer,
    };

    move || render_children(items.get(), ctx)
}

fn render_children(items: Vec<Item>, ctx: RenderCtx) -> Vec<AnyView> {
    items.into_iter().map(|item| render_item(item, ctx)).collect()
}

/// Base classes plus the item's override, space separated
pub fn class_string(classes: &[String], extra: Option<&str>) -> String {
    classes
        .iter()
        .map(String::as_str)
        .chain(extra.filter(|e| !e.is_empty()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `top: 7rem; opacity: 1`
pub fn style_string(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(prop, value)| format!("{}: {}", prop, value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_item(item: Item, ctx: RenderCtx) -> AnyView {
    let id = item.id().to_string();

    let class = {
        let id = id.clone();
        let classes = item.base().classes.clone();
        move || ctx.dynamic_classes.with(|dc| class_string(&classes, dc.get(&id).map(String::as_str)))
    };
    let style = {
        let id = id.clone();
        move || {
            ctx.item_styles
                .with(|styles| styles.get(&id).map(|d| style_string(d)).unwrap_or_default())
        }
    };
    let on_click = {
        let id = id.clone();
        let action = item.click_action().map(str::to_string);
        move |ev: web_sys::MouseEvent| {
            if let Some(action) = action.clone() {
                ev.stop_propagation();
                ctx.on_item_click.run(ItemClickEvent {
                    action,
                    item_id: id.clone(),
                });
            }
        }
    };

    match item {
        Item::Text(text) => view! {
            <span id=id class=class style=style on:click=on_click>
                {text.content}
            </span>
        }
        .into_any(),

        Item::Image(image) => view! {
            <img
                id=id
                class=class
                style=style
                src=image.image_src
                alt=image.alt_text
                on:click=on_click
            />
        }
        .into_any(),

        Item::Container(container) => view! {
            <div id=id class=class style=style on:click=on_click>
                {render_children(container.children, ctx)}
            </div>
        }
        .into_any(),

        Item::Button(button) => {
            let pointer = move |phase: PointerPhase, item_id: String, ev: &web_sys::Event| {
                if let Some(cb) = ctx.on_item_pointer {
                    let el: web_sys::Element = event_target(ev);
                    let rect = el.get_bounding_client_rect();
                    cb.run(ItemPointerEvent {
                        item_id,
                        phase,
                        center_y: rect.top() + rect.height() / 2.0,
                    });
                }
            };
            let enter_id = id.clone();
            let leave_id = id.clone();
            view! {
                <button
                    type="button"
                    id=id
                    class=class
                    style=style
                    on:click=on_click
                    on:pointerenter=move |ev| pointer(PointerPhase::Enter, enter_id.clone(), &ev)
                    on:pointerleave=move |ev| pointer(PointerPhase::Leave, leave_id.clone(), &ev)
                >
                    {render_children(button.children, ctx)}
                </button>
            }
            .into_any()
        }

        Item::Modal(modal) => {
            let condition = modal.show_condition;
            let children = modal.children;
            let shown = move || ctx.dynamic_state.with(|s| s.get(&condition).copied().unwrap_or(false));
            (move || {
                shown().then(|| {
                    view! {
                        <div id=id.clone() class=class.clone() style=style.clone() on:click=on_click.clone()>
                            {render_children(children.clone(), ctx)}
                        </div>
                    }
                })
            })
            .into_any()
        }

        Item::MenuItem(base) => {
            tracing::warn!(item_id = %base.id, "unexpanded menuItem placeholder reached the renderer");
            ().into_any()
        }
    }
}
