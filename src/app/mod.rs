use crate::components::ui::{
    Button, Panel, PanelContent, PanelDescription, PanelHeader, PanelTitle,
};
use crate::components::CountryPicker;
use crate::models::demo_countries;
use leptos::prelude::*;

/// Demo page: one form, two pickers. Submitting with a picker cleared sends
/// the placeholder value for that field.
#[component]
pub fn App() -> impl IntoView {
    let countries = demo_countries();

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-md flex-col justify-center px-4 py-12">
                <Panel>
                    <PanelHeader>
                        <PanelTitle class="text-xl">"Your details"</PanelTitle>
                        <PanelDescription>
                            "Start typing a country, then pick it from the list."
                        </PanelDescription>
                    </PanelHeader>

                    <PanelContent>
                        <form class="flex flex-col gap-4" method="get">
                            <CountryPicker
                                id="nationality"
                                name="nationality"
                                label="Nationality"
                                hint="If you have more than one, pick the one on your passport."
                                countries=countries.clone()
                            />
                            <CountryPicker
                                id="residence"
                                name="residence"
                                label="Country of residence"
                                default_code="GB"
                                countries=countries
                            />
                            <Button class="w-full">"Continue"</Button>
                        </form>
                    </PanelContent>
                </Panel>
            </div>
        </div>
    }
}
