//! "Daftar Sekarang" button for a course detail page.

use yew::prelude::*;

use crate::api::HttpBackend;
use crate::components::{Button, NoticeBanner};
use crate::enrollment::{enroll_course, enroll_failure_notice, EnrollStatus};
use crate::models::CourseId;
use crate::notice::Notice;
use crate::session::BrowserSession;

#[derive(Properties, PartialEq, Clone)]
pub struct EnrollButtonProps {
    pub course_id: CourseId,
    /// Fired once the course is in the user's cart (new or existing enrollment).
    #[prop_or_default]
    pub on_enrolled: Callback<EnrollStatus>,
    #[prop_or_else(|| "Daftar Sekarang".to_string())]
    pub label: String,
}

#[function_component(EnrollButton)]
pub fn enroll_button(props: &EnrollButtonProps) -> Html {
    let backend = use_memo((), |_| HttpBackend::default());
    let session = use_memo((), |_| BrowserSession::user());
    let enrolling = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    let onclick = {
        let backend = backend.clone();
        let session = session.clone();
        let enrolling = enrolling.clone();
        let notice = notice.clone();
        let course_id = props.course_id.clone();
        let on_enrolled = props.on_enrolled.clone();
        Callback::from(move |_: MouseEvent| {
            if *enrolling {
                return;
            }
            let backend = backend.clone();
            let session = session.clone();
            let enrolling = enrolling.clone();
            let notice = notice.clone();
            let course_id = course_id.clone();
            let on_enrolled = on_enrolled.clone();
            enrolling.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match enroll_course(session.as_ref(), backend.as_ref(), &course_id).await {
                    Ok(status) => {
                        notice.set(Some(status.notice()));
                        on_enrolled.emit(status);
                    }
                    Err(err) => notice.set(Some(enroll_failure_notice(&err, &course_id))),
                }
                enrolling.set(false);
            });
        })
    };

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    html! {
        <div class="ks-enroll">
            <Button
                label={if *enrolling { "Sedang mendaftar…".to_string() } else { props.label.clone() }}
                {onclick}
                disabled={*enrolling}
            />
            <NoticeBanner notice={(*notice).clone()} {on_dismiss} />
        </div>
    }
}
